use crate::error::{PipelineError, Result};
use candle_core::Device;

/// Which device the model should run on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeviceRequest {
    /// Host CPU.
    #[default]
    Cpu,
    /// CUDA device by ordinal. Needs the `cuda` feature.
    Cuda(usize),
}

impl DeviceRequest {
    /// Initialize the requested device.
    pub fn resolve(self) -> Result<Device> {
        match self {
            DeviceRequest::Cpu => Ok(Device::Cpu),
            DeviceRequest::Cuda(i) => Device::new_cuda(i).map_err(|e| {
                PipelineError::Device(format!(
                    "Failed to init CUDA device {i}: {e}. Try CPU as fallback."
                ))
            }),
        }
    }
}

impl std::fmt::Display for DeviceRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceRequest::Cpu => write!(f, "cpu"),
            DeviceRequest::Cuda(i) => write!(f, "cuda:{i}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_always_resolves() {
        assert!(matches!(DeviceRequest::Cpu.resolve(), Ok(Device::Cpu)));
    }

    #[cfg(not(feature = "cuda"))]
    #[test]
    fn cuda_without_feature_is_a_device_error() {
        let err = DeviceRequest::Cuda(0).resolve().unwrap_err();
        assert!(matches!(err, PipelineError::Device(ref m) if m.contains("CUDA device 0")));
    }
}
