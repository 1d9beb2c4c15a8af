// Run the edge pipeline on image files and save the results
//
// Usage: edge_tool <input> [output]
//   EDGE_* variables configure the pipeline, EDGE_LOG the log level.
use edge_viewer::tools::{edge_stats, load_frame, save_processed};
use edge_viewer::{check_ready, default_processor, identify, logging};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    input.with_file_name(format!("{stem}_edges.png"))
}

fn main() -> ExitCode {
    logging::init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        eprintln!("usage: edge_tool <input> [output]");
        return ExitCode::FAILURE;
    };
    let output = args.next().map(PathBuf::from).unwrap_or_else(|| output_path(&input));

    println!("{}", identify());
    if !check_ready() {
        eprintln!("self-test failed");
        return ExitCode::FAILURE;
    }

    let (frame, width, height) = match load_frame(&input) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("failed to load {}: {}", input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let processor = default_processor();
    let processed = match processor.process(&frame, width as i32, height as i32) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("processing failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stats = edge_stats(&processed);
    println!(
        "{} ({}x{}) strategy={} time={:.2}ms edges={} ({:.2}%)",
        input.display(),
        width,
        height,
        processed.strategy(),
        processed.elapsed().as_secs_f64() * 1000.0,
        stats.edge_pixels,
        stats.edge_ratio * 100.0
    );

    if let Err(e) = save_processed(&output, &processed) {
        eprintln!("failed to save {}: {}", output.display(), e);
        return ExitCode::FAILURE;
    }
    println!("wrote {}", output.display());
    ExitCode::SUCCESS
}
