//! Command-line surface of the `ontask` binary.
//!
//! Options are only recognised before the first input. From the first
//! argument that is not a known option onwards, every argument is taken
//! verbatim, so screen text such as `- buy milk` or an activity of `-v`
//! reaches the classifier untouched.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};

use crate::config::{
    ClassifierConfig, CACHE_DIR_ENV, DEFAULT_MODEL, DEFAULT_REVISION, MODEL_ENV, REVISION_ENV,
};
use crate::error::UsageError;
use crate::invoker::Invocation;
use crate::pipelines::utils::DeviceRequest;

/// Decide whether on-screen text matches the activity you meant to be doing.
///
/// Prints `on task` or `off task`.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Text currently visible on screen.
    #[arg(value_name = "TEXT")]
    pub screen_text: Option<OsString>,

    /// The activity you intend to be doing.
    #[arg(value_name = "ACTIVITY_DESCRIPTION")]
    pub activity_description: Option<OsString>,

    /// Ignored.
    #[arg(hide = true)]
    pub extra: Vec<OsString>,

    /// HuggingFace Hub repo id or local checkpoint directory.
    #[arg(long, short = 'm', env = MODEL_ENV, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Hub revision (branch, tag or commit).
    #[arg(long, env = REVISION_ENV, default_value = DEFAULT_REVISION)]
    pub revision: String,

    /// Where downloaded model files are cached.
    #[arg(long, env = CACHE_DIR_ENV, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Run on this CUDA device instead of the CPU.
    #[arg(long, value_name = "INDEX")]
    pub cuda: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse raw process arguments (program name first), exiting on `--help`,
    /// `--version` or a malformed option.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(split_args(args))
    }

    /// Like [`Cli::from_args`] but returns clap's error instead of exiting.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(split_args(args))
    }

    /// Both positional inputs, or the usage error naming `program`.
    /// Positional arguments past the second are ignored. Invalid UTF-8 is
    /// replaced rather than rejected.
    pub fn invocation(&self, program: &str) -> Result<Invocation, UsageError> {
        match (&self.screen_text, &self.activity_description) {
            (Some(text), Some(activity)) => Ok(Invocation::new(
                text.to_string_lossy(),
                activity.to_string_lossy(),
            )),
            _ => Err(UsageError::new(program)),
        }
    }

    /// Model and device settings for the pipeline builder.
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            model: self.model.clone(),
            revision: self.revision.clone(),
            cache_dir: self.cache_dir.clone(),
            device: self.cuda.map_or(DeviceRequest::Cpu, DeviceRequest::Cuda),
        }
    }
}

/// Reorders `args` into `program [options] -- [inputs]` so clap never reads
/// an input as a flag.
fn split_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut cmd = Cli::command();
    cmd.build();

    let mut args = args.into_iter().map(Into::into);
    let mut options: Vec<OsString> = args.next().into_iter().collect();
    let mut inputs = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--" {
            inputs.extend(args.by_ref());
            break;
        }
        match option_arity(&cmd, &arg) {
            Some(takes_value) => {
                options.push(arg);
                if takes_value {
                    options.extend(args.next());
                }
            }
            None => {
                inputs.push(arg);
                inputs.extend(args.by_ref());
                break;
            }
        }
    }

    options.push("--".into());
    options.extend(inputs);
    options
}

/// `Some(true)` for an option whose value is the next argument, `Some(false)`
/// for a flag or `--opt=value`, `None` when `arg` is not an option of `cmd`.
fn option_arity(cmd: &clap::Command, arg: &OsStr) -> Option<bool> {
    let arg = arg.to_str()?;

    if let Some(long) = arg.strip_prefix("--") {
        let (name, inline) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        let opt = cmd.get_arguments().find(|a| a.get_long() == Some(name))?;
        let takes_value = opt.get_action().takes_values();
        return match (takes_value, inline) {
            (true, inline) => Some(!inline),
            (false, false) => Some(false),
            (false, true) => None,
        };
    }

    let shorts = arg.strip_prefix('-')?;
    let mut chars = shorts.chars();
    let first = chars.next()?;
    let opt = cmd.get_arguments().find(|a| a.get_short() == Some(first))?;
    if opt.get_action().takes_values() {
        // Only the bare `-m VALUE` spelling.
        return chars.as_str().is_empty().then_some(true);
    }
    chars
        .all(|c| {
            cmd.get_arguments()
                .any(|a| a.get_short() == Some(c) && !a.get_action().takes_values())
        })
        .then_some(false)
}

/// File name of the running executable, for the usage line.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(std::path::Path::new)
        .and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
