// Copyright 2024 Karpeles Lab Inc.
// BGZF compression command-line tool

use anyhow::{Context, Result};
use clap::Parser;
use flate2::read::MultiGzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use minbgzf::{Writer, WriterBuilder, BGZF_EOF, SAFE_BLOCK_SIZE};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bgzw")]
#[command(about = "BGZF compression tool", long_about = None)]
#[command(version)]
struct Args {
    /// Input files to compress ("-" reads stdin)
    #[arg(required = true)]
    files: Vec<String>,

    /// Write output to stdout
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Output file (use with single input file)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Compression level (0-9)
    #[arg(short = 'l', long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(0..=9))]
    level: u32,

    /// Uncompressed bytes per block (1-65536)
    #[arg(long, default_value_t = SAFE_BLOCK_SIZE)]
    block_size: usize,

    /// Append to the output file instead of replacing it
    #[arg(short = 'a', long)]
    append: bool,

    /// Do not overwrite existing files
    #[arg(long)]
    safe: bool,

    /// Delete source files after successful compression
    #[arg(long)]
    rm: bool,

    /// Verify written files by decompressing them
    #[arg(long)]
    verify: bool,

    /// Run benchmark n times (no output will be written)
    #[arg(long)]
    bench: Option<usize>,

    /// Quiet mode - don't print progress
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // Validate arguments
    if args.stdout && args.output.is_some() {
        anyhow::bail!("Cannot use both -c and -o");
    }

    if args.files.len() > 1 && args.output.is_some() {
        anyhow::bail!("Cannot use -o with multiple input files");
    }

    if args.append && args.safe {
        anyhow::bail!("Cannot use both --append and --safe");
    }

    if let Some(bench_count) = args.bench {
        return run_benchmark(&args, bench_count);
    }

    if args.files.len() == 1 && args.files[0] == "-" {
        return compress_stdio(&args);
    }

    for file in &args.files {
        compress_file(file, &args)?;
    }

    Ok(())
}

fn mode(args: &Args) -> &'static str {
    if args.append {
        "ab"
    } else {
        "wb"
    }
}

fn run_benchmark(args: &Args, iterations: usize) -> Result<()> {
    use std::time::Instant;

    for file_path in &args.files {
        if file_path == "-" {
            anyhow::bail!("Cannot benchmark stdin");
        }

        let input = PathBuf::from(file_path);
        let file_data = fs::read(&input)
            .with_context(|| format!("Failed to read file: {}", input.display()))?;
        let file_size = file_data.len();

        println!(
            "Benchmarking {} ({} bytes, {} iterations):",
            input.display(),
            file_size,
            iterations
        );

        let start = Instant::now();
        let mut compressed_size = 0;
        for _ in 0..iterations {
            let mut writer = WriterBuilder::new()
                .handle(Vec::with_capacity(file_size))
                .level(args.level)
                .block_size(args.block_size)
                .build()?;
            writer.write_bytes(&file_data)?;
            compressed_size = writer.finish()?.into_handle().map_or(0, |v| v.len());
        }
        let elapsed = start.elapsed();

        let avg_time = elapsed.as_secs_f64() / iterations.max(1) as f64;
        let throughput = file_size as f64 / avg_time / 1024.0 / 1024.0;

        println!(
            "  Average: {:.3}s per iteration ({:.2} MB/s), {} -> {} bytes",
            avg_time, throughput, file_size, compressed_size
        );
    }

    Ok(())
}

fn compress_stdio(args: &Args) -> Result<()> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();

    match args.output {
        Some(ref output) => {
            check_output(output, args)?;
            let mut writer = WriterBuilder::new()
                .path(output)
                .mode(mode(args))
                .level(args.level)
                .block_size(args.block_size)
                .build()
                .with_context(|| format!("Failed to open output file: {}", output.display()))?;
            compress_stream(&mut reader, &mut writer, None)?;
            writer.close()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = WriterBuilder::new()
                .handle(stdout.lock())
                .level(args.level)
                .block_size(args.block_size)
                .build()?;
            compress_stream(&mut reader, &mut writer, None)?;
            writer.close()?;
        }
    }

    Ok(())
}

fn check_output(output: &Path, args: &Args) -> Result<()> {
    if args.safe && output.exists() {
        anyhow::bail!("Output file already exists: {}", output.display());
    }
    Ok(())
}

fn compress_file(input_path: &str, args: &Args) -> Result<()> {
    let input = PathBuf::from(input_path);

    if !input.exists() {
        anyhow::bail!("File not found: {}", input_path);
    }

    if !input.is_file() {
        anyhow::bail!("Not a file: {}", input_path);
    }

    let file_size = fs::metadata(&input)?.len();

    let pb = if !args.quiet && !args.stdout {
        let pb = ProgressBar::new(file_size);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut input_file = File::open(&input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;

    if args.stdout {
        let stdout = io::stdout();
        let mut writer = WriterBuilder::new()
            .handle(stdout.lock())
            .level(args.level)
            .block_size(args.block_size)
            .build()?;
        compress_stream(&mut input_file, &mut writer, pb.as_ref())?;
        writer.close()?;
        return Ok(());
    }

    let output = match args.output {
        Some(ref out) => out.clone(),
        None => gz_path(&input),
    };
    check_output(&output, args)?;

    let mut writer = WriterBuilder::new()
        .path(&output)
        .mode(mode(args))
        .level(args.level)
        .block_size(args.block_size)
        .build()
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    compress_stream(&mut input_file, &mut writer, pb.as_ref())?;
    writer
        .close()
        .with_context(|| format!("Failed to finish output file: {}", output.display()))?;
    info!("{}: {} blocks", output.display(), writer.blocks_written());

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    if !args.quiet {
        let output_size = fs::metadata(&output)?.len();
        if file_size > 0 {
            let ratio = (output_size as f64 / file_size as f64) * 100.0;
            println!(
                "{} -> {} ({:.2}%)",
                input.display(),
                output.display(),
                ratio
            );
        }
    }

    // Appended output also holds earlier data, so it cannot be compared
    if args.verify && !args.append {
        verify_compressed_file(&input, &output)?;
    }

    if args.rm {
        fs::remove_file(&input)
            .with_context(|| format!("Failed to remove source file: {}", input.display()))?;
    }

    Ok(())
}

/// `reads.sam` becomes `reads.sam.gz`
fn gz_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}

fn compress_stream<R: Read, W: Write>(
    input: &mut R,
    writer: &mut Writer<W>,
    pb: Option<&ProgressBar>,
) -> Result<()> {
    let mut buffer = vec![0u8; 128 * 1024];

    loop {
        let n = input.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        writer.write_bytes(&buffer[..n])?;
        if let Some(pb) = pb {
            pb.inc(n as u64);
        }
    }
    debug!("compressed stream into {} blocks", writer.blocks_written());

    Ok(())
}

fn verify_compressed_file(original: &Path, compressed: &Path) -> Result<()> {
    let original_data = fs::read(original).with_context(|| {
        format!(
            "Failed to open original file for verification: {}",
            original.display()
        )
    })?;

    let compressed_data = fs::read(compressed).with_context(|| {
        format!(
            "Failed to open compressed file for verification: {}",
            compressed.display()
        )
    })?;

    if !compressed_data.ends_with(&BGZF_EOF) {
        anyhow::bail!(
            "Verification failed: {} does not end with the BGZF EOF marker",
            compressed.display()
        );
    }

    let mut decompressed_data = Vec::new();
    MultiGzDecoder::new(&compressed_data[..])
        .read_to_end(&mut decompressed_data)
        .with_context(|| {
            format!(
                "Failed to decompress file for verification: {}",
                compressed.display()
            )
        })?;

    if original_data != decompressed_data {
        anyhow::bail!(
            "Verification failed: decompressed data does not match original (original: {} bytes, decompressed: {} bytes)",
            original_data.len(),
            decompressed_data.len()
        );
    }

    Ok(())
}
