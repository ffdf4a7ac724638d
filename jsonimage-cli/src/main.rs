mod encode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use encode::OutputFormat;
use jsonimage::{DecodeError, DecoderRegistry, DecodingContext, ThumbnailOptions};

#[derive(Parser)]
#[command(name = "jsonimage-cli")]
#[command(about = "Decode images embedded in JSON envelopes", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true, default_value_t)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, default_value_t)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Decode JSON envelopes (or plain images) into image files
    Decode(DecodeArgs),
    /// Wrap an image file into a JSON envelope
    Wrap {
        /// Image file (PNG, JPEG, ...)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file, stdout when omitted
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct DecodeArgs {
    /// Input files
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Output image format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Png)]
    format: OutputFormatArg,

    /// JPEG quality (0-100)
    #[arg(long, value_name = "QUALITY", default_value_t = 85)]
    quality: u8,

    /// Display scale recorded on the decoded image
    #[arg(long, value_name = "SCALE")]
    scale: Option<f32>,

    /// Downsample to fit inside WIDTHxHEIGHT
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    thumbnail: Option<ThumbnailOptions>,

    /// Fill the thumbnail box and crop the overflow
    #[arg(long, requires = "thumbnail")]
    crop: bool,
}

impl DecodeArgs {
    fn output_format(&self) -> Result<OutputFormat> {
        match self.format {
            OutputFormatArg::Png => Ok(OutputFormat::Png),
            OutputFormatArg::Jpeg => {
                if self.quality > 100 {
                    anyhow::bail!("Quality must be between 0 and 100");
                }
                Ok(OutputFormat::Jpeg {
                    quality: self.quality,
                })
            }
        }
    }

    fn thumbnail(&self) -> Option<ThumbnailOptions> {
        self.thumbnail
            .map(|t| if self.crop { t.cropped() } else { t })
    }

    fn output_path(&self, input: &Path, format: OutputFormat) -> PathBuf {
        // don't use .with_extension() bc it replaces everything after the first dot
        let mut filename = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image")
            .to_string();
        filename.push('.');
        filename.push_str(format.extension());
        self.output_dir.join(filename)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormatArg {
    Png,
    Jpeg,
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose, args.quiet);

    match args.command {
        Command::Decode(decode) => decode_all(&decode),
        Command::Wrap { input, output } => wrap(&input, output.as_deref()),
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn decode_all(args: &DecodeArgs) -> Result<()> {
    let format = args.output_format()?;

    if !args.output_dir.exists() {
        fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;
    }

    jsonimage::ensure_registered();

    let failed = args
        .inputs
        .par_iter()
        .filter(|input| match decode_file(input, args, format) {
            Ok(output) => {
                log::info!("Done: {}", output.display());
                false
            }
            Err(e) => {
                log::error!("{}: {:#}", input.display(), e);
                true
            }
        })
        .count();

    if failed > 0 {
        anyhow::bail!("Failed to decode {failed} of {} inputs", args.inputs.len());
    }

    Ok(())
}

fn decode_file(input: &Path, args: &DecodeArgs, format: OutputFormat) -> Result<PathBuf> {
    let data = fs::read(input).context("Failed to read input")?;

    let mut context = DecodingContext::new(&data);
    if let Some(scale) = args.scale {
        context = context.with_scale(scale);
    }
    if let Some(thumbnail) = args.thumbnail() {
        context = context.with_thumbnail(thumbnail);
    }

    let decoder = DecoderRegistry::shared()
        .decoder(&context)
        .ok_or(DecodeError::NoDecoder)?;
    log::debug!(
        "Decoding {} (asynchronous: {})",
        input.display(),
        decoder.is_asynchronous()
    );

    let container = decoder.decode(&data).context("Failed to decode image")?;
    let (width, height) = container.dimensions();
    log::debug!("Decoded {width}x{height} image from {}", input.display());

    let output = args.output_path(input, format);
    let mut writer =
        BufWriter::new(File::create(&output).context("Failed to create output file")?);
    encode::encode_image(&container.image, &mut writer, format)?;
    writer.flush().context("Failed to write output file")?;

    Ok(output)
}

fn wrap(input: &Path, output: Option<&Path>) -> Result<()> {
    let data = fs::read(input).context("Failed to read input")?;
    let format = imageproc::image::guess_format(&data)
        .with_context(|| format!("Not a recognized image: {}", input.display()))?;
    log::debug!("Wrapping {format:?} image of {} bytes", data.len());

    let mut envelope = jsonimage::envelope::wrap_image_bytes(&data);
    envelope.push(b'\n');

    match output {
        Some(path) => fs::write(path, envelope).context("Failed to write output file")?,
        None => std::io::stdout()
            .write_all(&envelope)
            .context("Failed to write to stdout")?,
    }

    Ok(())
}
