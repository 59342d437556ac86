use clap::Parser;
use serde::Serialize;
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use image_basics::{ChannelOrder, Method, viewer};

#[derive(Parser, Debug)]
#[command(
    name = "image_basics",
    about = "Show one image through a native window and two plotting figures",
    version
)]
struct Cli {
    /// Image to display
    #[arg(default_value = "images/blue.png")]
    path: PathBuf,

    /// Display pathway to run; repeat to choose several. Defaults to all three in order
    #[arg(long = "method", short = 'm', value_enum)]
    methods: Vec<Method>,

    /// Print a JSON summary of each decoded buffer instead of opening windows
    #[arg(long)]
    inspect: bool,
}

#[derive(Serialize)]
struct BufferSummary {
    method: Method,
    width: u32,
    height: u32,
    order: ChannelOrder,
    first_pixel: Option<[u8; 3]>,
}

/// Writes one JSON line per method describing the buffer it decodes.
fn inspect(path: &Path, methods: &[Method], mut out: impl Write) -> Result<(), Box<dyn Error>> {
    for &method in methods {
        let buffer = method.load(path)?;
        let summary = BufferSummary {
            method,
            width: buffer.width(),
            height: buffer.height(),
            order: buffer.order(),
            first_pixel: (buffer.width() > 0 && buffer.height() > 0).then(|| buffer.pixel(0, 0)),
        };
        serde_json::to_writer(&mut out, &summary)?;
        writeln!(out)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_basics=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    let methods = if cli.methods.is_empty() {
        Method::ALL.to_vec()
    } else {
        cli.methods
    };

    if cli.inspect {
        return inspect(&cli.path, &methods, io::stdout().lock());
    }

    tracing::info!(path = %cli.path.display(), ?methods, "starting viewer");
    viewer::app::run(cli.path, methods)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_bundled_image() {
        let cli = Cli::try_parse_from(["image_basics"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("images/blue.png"));
        assert!(cli.methods.is_empty());
        assert!(!cli.inspect);
    }

    #[test]
    fn methods_keep_command_line_order() {
        let cli = Cli::try_parse_from([
            "image_basics",
            "cat.jpg",
            "-m",
            "alternate",
            "--method",
            "native",
        ])
        .unwrap();
        assert_eq!(cli.path, PathBuf::from("cat.jpg"));
        assert_eq!(cli.methods, vec![Method::Alternate, Method::Native]);
    }

    fn red_fixture(dir: &Path) -> PathBuf {
        let path = dir.join("red.png");
        image::RgbImage::from_pixel(2, 2, image::Rgb([255, 0, 0]))
            .save(&path)
            .expect("failed to write fixture");
        path
    }

    #[test]
    fn inspect_prints_one_json_line_per_method() {
        let dir = tempfile::tempdir().unwrap();
        let path = red_fixture(dir.path());

        let mut out = Vec::new();
        inspect(&path, &Method::ALL, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                r#"{"method":"native","width":2,"height":2,"order":"bgr","first_pixel":[0,0,255]}"#,
                r#"{"method":"converted","width":2,"height":2,"order":"rgb","first_pixel":[255,0,0]}"#,
                r#"{"method":"alternate","width":2,"height":2,"order":"rgb","first_pixel":[255,0,0]}"#,
            ]
        );
    }

    #[test]
    fn inspect_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        let mut out = Vec::new();
        assert!(inspect(&path, &[Method::Alternate], &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn rejects_unknown_method() {
        assert!(Cli::try_parse_from(["image_basics", "-m", "opencv"]).is_err());
    }
}
