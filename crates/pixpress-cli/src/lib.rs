use anyhow::{anyhow, Context};
use clap::ValueEnum;
use pixpress_processing::{CropBox, ResizeTarget, Rotation};

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Resize preset as accepted on the command line.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ResizeArg {
    #[default]
    Original,
    Half,
    Quarter,
}

impl ResizeArg {
    pub fn to_target(self) -> ResizeTarget {
        match self {
            ResizeArg::Original => ResizeTarget::Original,
            ResizeArg::Half => ResizeTarget::Half,
            ResizeArg::Quarter => ResizeTarget::Quarter,
        }
    }
}

/// Parse a counter-clockwise rotation given in degrees.
pub fn parse_rotation(degrees: u32) -> anyhow::Result<Rotation> {
    Rotation::from_degrees(degrees)
        .ok_or_else(|| anyhow!("rotation must be one of 0, 90, 180, 270, got {degrees}"))
}

/// Parse a crop box written as `left,top,right,bottom`.
pub fn parse_crop(spec: &str) -> anyhow::Result<CropBox> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(anyhow!(
            "crop must be four comma-separated integers (left,top,right,bottom), got {spec:?}"
        ));
    }
    let mut values = [0u32; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .with_context(|| format!("invalid crop coordinate {part:?}"))?;
    }
    Ok(CropBox::new(values[0], values[1], values[2], values[3]))
}
