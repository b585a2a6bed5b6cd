//! ddsloader CLI - decode DDS textures the way the engine loader does.

mod logging;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use walkdir::WalkDir;

use ddsloader_dds::{
    decode_bytes, decode_file, DdsHeader, LoaderSettings, TextureInfo, HEADER_LEN,
};

/// ddsloader - DDS texture decoding tool
#[derive(Parser)]
#[command(name = "ddsloader")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the header and decode result of a DDS file
    Info {
        /// Input DDS file
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Decode a DDS file and write the raw payload
    Decode {
        /// Input DDS file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the decoded payload
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Decode every DDS file under a directory
    Batch {
        /// Root directory
        #[arg(short, long)]
        input: PathBuf,

        /// Only decode files whose relative path matches this glob
        #[arg(short, long)]
        filter: Option<String>,

        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(Args)]
struct SettingsArgs {
    /// JSON settings file
    #[arg(short, long, env = "DDSLOADER_SETTINGS")]
    settings: Option<PathBuf>,

    /// Leading mip levels to drop from regular textures
    #[arg(long, allow_hyphen_values = true)]
    mipmap_bias: Option<i32>,

    /// Leading mip levels to drop from normal maps
    #[arg(long, allow_hyphen_values = true)]
    normal_mipmap_bias: Option<i32>,
}

impl SettingsArgs {
    fn resolve(&self) -> Result<LoaderSettings> {
        let mut settings = match &self.settings {
            Some(path) => LoaderSettings::load(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => LoaderSettings::default(),
        };

        if let Some(bias) = self.mipmap_bias {
            settings.mipmap_bias = bias;
        }
        if let Some(bias) = self.normal_mipmap_bias {
            settings.normal_mipmap_bias = bias;
        }

        Ok(settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Info { input, settings } => {
            cmd_info(&input, &settings.resolve()?)?;
        }
        Commands::Decode {
            input,
            output,
            settings,
        } => {
            cmd_decode(&input, &output, &settings.resolve()?)?;
        }
        Commands::Batch {
            input,
            filter,
            settings,
        } => {
            cmd_batch(&input, filter.as_deref(), &settings.resolve()?)?;
        }
    }

    Ok(())
}

fn cmd_info(input: &Path, settings: &LoaderSettings) -> Result<()> {
    let data = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let header = DdsHeader::parse(&data[..data.len().min(HEADER_LEN)])
        .context("Failed to parse DDS header")?;

    let (width, height, mipmap_count, flags) =
        (header.width, header.height, header.mipmap_count, header.flags);
    let pixel_format = header.pixel_format;
    let (pf_flags, bit_count) = (pixel_format.flags, pixel_format.rgb_bit_count);

    println!("File:         {}", input.display());
    println!("Size:         {} bytes", data.len());
    println!("Dimensions:   {}x{}", width, height);
    println!("Mipmaps:      {}", mipmap_count);
    println!("Flags:        {:#010x}", flags);
    println!("Pixel flags:  {:#010x}", pf_flags);
    println!("FourCC:       {}", pixel_format.four_cc);
    println!("Bit count:    {}", bit_count);

    let image =
        decode_bytes(&data, &texture_name(input), settings).context("Failed to decode DDS")?;
    println!();
    println!("Format:       {}", image.format);
    println!("Compressed:   {}", image.is_compressed);
    println!("Normal map:   {}", image.is_normal_map);
    println!("Decoded:      {}x{}, {} mipmaps", image.width, image.height, image.mipmap_count);
    println!("Payload:      {} bytes", image.data.len());

    Ok(())
}

fn cmd_decode(input: &Path, output: &Path, settings: &LoaderSettings) -> Result<()> {
    tracing::info!("Decoding: {} -> {}", input.display(), output.display());

    let image = decode_file(input, settings).context("Failed to decode DDS")?;
    fs::write(output, &image.data).context("Failed to write output file")?;

    tracing::info!(
        format = %image.format,
        width = image.width,
        height = image.height,
        mipmaps = image.mipmap_count,
        bytes = image.data.len(),
        "Decode complete"
    );

    Ok(())
}

fn cmd_batch(root: &Path, filter: Option<&str>, settings: &LoaderSettings) -> Result<()> {
    let pattern = filter
        .map(glob::Pattern::new)
        .transpose()
        .context("Invalid filter pattern")?;

    let files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_dds(entry.path()))
        .map(|entry| entry.into_path())
        .filter(|path| {
            pattern
                .as_ref()
                .map_or(true, |p| p.matches(&texture_url(root, path)))
        })
        .collect();

    tracing::info!("Decoding {} textures under {}", files.len(), root.display());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let failed = AtomicUsize::new(0);

    let loaded: Vec<TextureInfo> = files
        .par_iter()
        .filter_map(|path| {
            let url = texture_url(root, path);
            let result = TextureInfo::load(path, url, settings);
            pb.inc(1);

            match result {
                Ok(info) => Some(info),
                Err(e) => {
                    tracing::warn!("Texture load error with '{}': {}", path.display(), e);
                    failed.fetch_add(1, Ordering::Relaxed);
                    None
                }
            }
        })
        .collect();

    pb.finish_and_clear();

    let mut by_format: BTreeMap<&'static str, usize> = BTreeMap::new();
    for info in &loaded {
        *by_format.entry(info.image.format.name()).or_default() += 1;
    }
    let normals = loaded.iter().filter(|info| info.is_normal).count();
    let readable = loaded.iter().filter(|info| info.is_readable).count();
    let bytes: usize = loaded.iter().map(|info| info.image.data.len()).sum();

    println!(
        "Decoded {} textures in {:?} ({} errors)",
        loaded.len(),
        start.elapsed(),
        failed.load(Ordering::Relaxed)
    );
    for (format, count) in &by_format {
        println!("  {:<8} {}", format, count);
    }
    println!("  normal maps: {}, readable: {}, payload: {} bytes", normals, readable, bytes);

    Ok(())
}

fn is_dds(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("dds"))
}

/// Texture name used for normal-map detection: the file stem.
fn texture_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Texture URL: path relative to the root, `/`-separated, without extension.
fn texture_url(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_dds() {
        assert!(is_dds(Path::new("a/b/hull.dds")));
        assert!(is_dds(Path::new("a/b/hull.DDS")));
        assert!(!is_dds(Path::new("a/b/hull.png")));
        assert!(!is_dds(Path::new("a/b/dds")));
    }

    #[test]
    fn test_texture_name() {
        assert_eq!(texture_name(Path::new("Parts/hullNRM.dds")), "hullNRM");
        assert_eq!(texture_name(Path::new("hull")), "hull");
        assert_eq!(texture_name(Path::new("")), "");
    }

    #[test]
    fn test_cmd_info() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plate.dds");

        // 4x4 DXT1 header with one block of payload
        let mut file = Vec::from(*b"DDS ");
        for value in [124u32, 0x1007, 4, 4, 0, 0, 1] {
            file.extend_from_slice(&value.to_le_bytes());
        }
        file.extend_from_slice(&[0; 44]);
        for value in [32u32, 0x4] {
            file.extend_from_slice(&value.to_le_bytes());
        }
        file.extend_from_slice(b"DXT1");
        file.extend_from_slice(&[0; 20]);
        file.extend_from_slice(&0x1000u32.to_le_bytes());
        file.extend_from_slice(&[0; 16]);
        file.extend_from_slice(&[0xAB; 8]);
        assert_eq!(file.len(), HEADER_LEN + 8);
        std::fs::write(&path, &file).unwrap();

        cmd_info(&path, &LoaderSettings::default()).unwrap();

        let image = decode_bytes(&file, &texture_name(&path), &LoaderSettings::default()).unwrap();
        assert_eq!(image.data, vec![0xAB; 8]);
        assert!(!image.is_normal_map);
    }

    #[test]
    fn test_texture_url() {
        let root = Path::new("GameData");
        let path = root.join("Squad").join("Parts").join("hullNRM.dds");

        assert_eq!(texture_url(root, &path), "Squad/Parts/hullNRM");
    }

    #[test]
    fn test_settings_args_override() {
        let args = SettingsArgs {
            settings: None,
            mipmap_bias: Some(2),
            normal_mipmap_bias: None,
        };
        let settings = args.resolve().unwrap();

        assert_eq!(settings.mipmap_bias, 2);
        assert_eq!(settings.normal_mipmap_bias, 0);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "ddsloader",
            "-v",
            "decode",
            "-i",
            "in.dds",
            "-o",
            "out.bin",
            "--mipmap-bias",
            "-1",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Decode { settings, .. } => assert_eq!(settings.mipmap_bias, Some(-1)),
            _ => panic!("expected decode command"),
        }
    }
}
