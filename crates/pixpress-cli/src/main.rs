//! Pixpress CLI for transforming images and publishing them to the CDN
//! bucket.
//!
//! Local mode writes the compressed WebP next to the input (or under
//! --out). Publish mode requires the R2/CDN environment variables and a
//! valid one-time code passed via --otp.

use anyhow::{anyhow, Context};
use clap::Parser;
use pixpress_cli::{init_tracing, parse_crop, parse_rotation, ResizeArg};
use pixpress_core::{format_size, AuthToken, Config, SourceImage, TotpVerifier};
use pixpress_processing::{decode_normalized, process, Publisher, Quality, TransformParams};
use pixpress_storage::S3Storage;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pixpress", about = "Compress images to WebP and publish them to a CDN bucket")]
struct Cli {
    /// Image files to process
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Resize preset applied before rotation and crop
    #[arg(long, value_enum, default_value_t = ResizeArg::Original)]
    resize: ResizeArg,

    /// Counter-clockwise rotation in degrees (0, 90, 180, 270)
    #[arg(long, default_value_t = 0)]
    rotate: u32,

    /// Crop box as left,top,right,bottom in post-rotation pixel coordinates
    #[arg(long)]
    crop: Option<String>,

    /// WebP quality (0-100)
    #[arg(long, default_value_t = 50)]
    quality: u8,

    /// Upload results to the bucket instead of writing local files
    #[arg(long)]
    publish: bool,

    /// One-time code, required with --publish
    #[arg(long)]
    otp: Option<String>,

    /// Output directory for local mode (defaults to each input's directory)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Serialize)]
struct FileReport {
    file: String,
    original_size: String,
    compressed_size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_url: Option<String>,
}

/// Destination for processed artifacts.
enum Sink {
    Local { out_dir: Option<PathBuf> },
    Remote { publisher: Publisher, token: AuthToken },
}

fn build_params(cli: &Cli) -> anyhow::Result<TransformParams> {
    Ok(TransformParams {
        resize: cli.resize.to_target(),
        rotate: parse_rotation(cli.rotate)?,
        crop: cli.crop.as_deref().map(parse_crop).transpose()?,
        quality: Quality::new(cli.quality).context("invalid --quality")?,
    })
}

fn remote_sink(otp: Option<&str>) -> anyhow::Result<Sink> {
    let code = otp.ok_or_else(|| anyhow!("--publish requires --otp"))?;
    let config = Config::from_env().context("loading configuration")?;

    let verifier = TotpVerifier::new(&config.totp_secret)?;
    let token = verifier
        .authenticate(code)?
        .ok_or_else(|| anyhow!("one-time code rejected"))?;

    let storage = S3Storage::new(
        config.r2_bucket_name.clone(),
        config.endpoint_url(),
        config.r2_access_key_id.clone(),
        config.r2_secret_access_key.clone(),
    )?;
    let publisher = Publisher::new(Arc::new(storage), config.cdn_base_url);
    Ok(Sink::Remote { publisher, token })
}

fn local_output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{stem}_compressed.webp"))
}

async fn process_file(
    path: &Path,
    params: &TransformParams,
    sink: &Sink,
) -> anyhow::Result<FileReport> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("{} has no filename", path.display()))?;
    let source = SourceImage::new(data, filename);

    let raster = decode_normalized(source.data())
        .with_context(|| format!("decoding {}", path.display()))?;
    let artifact = process(raster, params)?;

    let mut report = FileReport {
        file: path.display().to_string(),
        original_size: format_size(source.size()),
        compressed_size: format_size(artifact.len()),
        output: None,
        public_url: None,
    };

    match sink {
        Sink::Local { out_dir } => {
            let out_path = local_output_path(path, out_dir.as_deref());
            std::fs::write(&out_path, artifact.data())
                .with_context(|| format!("writing {}", out_path.display()))?;
            report.output = Some(out_path.display().to_string());
        }
        Sink::Remote { publisher, token } => {
            let result = publisher.publish(&artifact, source.filename(), token).await;
            if !result.success {
                return Err(anyhow!(
                    "publish of {} failed: {}",
                    result.output_key,
                    result.error.unwrap_or_else(|| "unknown error".to_string())
                ));
            }
            report.output = Some(result.output_key);
            report.public_url = result.public_url;
        }
    }

    Ok(report)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let params = build_params(&cli)?;

    let sink = if cli.publish {
        remote_sink(cli.otp.as_deref())?
    } else {
        Sink::Local {
            out_dir: cli.out.clone(),
        }
    };

    // Files are independent: one failure never stops the rest.
    let mut failures = 0usize;
    for path in &cli.files {
        match process_file(path, &params, &sink).await {
            Ok(report) => {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            Err(e) => {
                failures += 1;
                tracing::error!(file = %path.display(), error = %e, "processing failed");
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!("{failures} file(s) failed"));
    }
    Ok(())
}
