use std::path::PathBuf;

use anyhow::{bail, Context};

const USAGE: &str = "usage: redact <image> <commands.json> [output.png]";

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let (Some(image), Some(script)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };
    let output = args.next();
    if args.next().is_some() {
        bail!(USAGE);
    }

    let written = redact::run(&image, &script, output.as_deref())
        .with_context(|| format!("failed to redact {}", image.display()))?;
    println!("{}", written.display());
    Ok(())
}
