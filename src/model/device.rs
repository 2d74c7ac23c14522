use candle_core::Device;
use tracing::{info, warn};

/// Picks CUDA, then Metal, when compiled in and present; otherwise the CPU.
///
/// An accelerator that is compiled in but fails to initialise is logged and skipped.
pub fn select_device() -> Device {
    let device = Device::cuda_if_available(0).unwrap_or_else(|e| {
        warn!(error = %e, "CUDA initialisation failed");
        Device::Cpu
    });

    let device = if device.is_cpu() {
        Device::metal_if_available(0).unwrap_or_else(|e| {
            warn!(error = %e, "Metal initialisation failed");
            Device::Cpu
        })
    } else {
        device
    };

    info!(
        cuda = device.is_cuda(),
        metal = device.is_metal(),
        "Selected inference device"
    );
    device
}
