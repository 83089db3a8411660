use barscan::display::default_viewer;
use barscan::zxing::{
    DEFAULT_CORE_JAR, DEFAULT_DOCKER_IMAGE, DEFAULT_IMAGE, DEFAULT_JAVASE_JAR,
    DEFAULT_JCOMMANDER_JAR, DEFAULT_OUTPUT,
};
use barscan::{Error, SystemRunner, ZxingConfig, run_decode, run_locate};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "barscan", version, about = "Barcode decoding and annotation tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode QR codes in an image and print their payloads
    Decode {
        #[arg(long, env = "BARSCAN_IMAGE", default_value = "qrcode.png")]
        image: PathBuf,
    },
    /// Locate a barcode with ZXing and outline it on the image
    Locate {
        #[arg(long, env = "BARSCAN_IMAGE", default_value = DEFAULT_IMAGE)]
        image: PathBuf,
        #[arg(long, env = "BARSCAN_JAVASE_JAR", default_value = DEFAULT_JAVASE_JAR)]
        javase_jar: PathBuf,
        #[arg(long, env = "BARSCAN_CORE_JAR", default_value = DEFAULT_CORE_JAR)]
        core_jar: PathBuf,
        #[arg(long, env = "BARSCAN_JCOMMANDER_JAR", default_value = DEFAULT_JCOMMANDER_JAR)]
        jcommander_jar: PathBuf,
        #[arg(long, env = "BARSCAN_OUTPUT", default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        #[arg(long, env = "BARSCAN_DOCKER_IMAGE", default_value = DEFAULT_DOCKER_IMAGE)]
        docker_image: String,
        /// Directory mounted into the container [default: current directory]
        #[arg(long, env = "BARSCAN_WORKDIR")]
        workdir: Option<PathBuf>,
        /// Write the annotated image without opening a window
        #[arg(long)]
        no_display: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Decode { image } => decode_cmd(image),
        Command::Locate {
            image,
            javase_jar,
            core_jar,
            jcommander_jar,
            output,
            docker_image,
            workdir,
            no_display,
        } => workdir_or_current(workdir).and_then(|workdir| {
            let config = ZxingConfig::default()
                .with_workdir(workdir)
                .with_jars(javase_jar, core_jar, jcommander_jar)
                .with_image(image)
                .with_output(output)
                .with_docker_image(docker_image);
            locate_cmd(&config, no_display)
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // the pipeline already printed the diagnostic
        Err(Error::NoBarcodeDetected) => ExitCode::FAILURE,
        Err(err) => {
            let _ = io::stdout().flush();
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn decode_cmd(image: PathBuf) -> barscan::Result<()> {
    let stdout = io::stdout();
    run_decode(&image, &mut stdout.lock())?;
    Ok(())
}

fn locate_cmd(config: &ZxingConfig, no_display: bool) -> barscan::Result<()> {
    let mut viewer = default_viewer(no_display);
    let stdout = io::stdout();
    run_locate(config, &mut SystemRunner, &mut viewer, &mut stdout.lock())?;
    Ok(())
}

/// The container runtime needs an absolute mount source
fn workdir_or_current(workdir: Option<PathBuf>) -> barscan::Result<PathBuf> {
    let workdir = match workdir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    Ok(std::path::absolute(workdir)?)
}
