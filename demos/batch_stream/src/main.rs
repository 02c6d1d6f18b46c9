// =============================================================================
// Batch Stream Demo — corral
// =============================================================================
//
// Streams a synthetic in-memory dataset through the batcher for a few
// epochs, once with round-robin wrap-around and once with declared
// padding, and prints what each epoch produced.
//
// Usage:
//   cargo run -p batch-stream-demo                 # defaults: 250 samples, batch 32
//   cargo run -p batch-stream-demo -- --samples 1000 --batch-size 64
//   RUST_LOG=debug cargo run -p batch-stream-demo  # see the batcher's logging

use corral_core::Result;
use corral_data::{BatchConfig, Batcher, InMemorySource, Normalize, SampleSource, TransformSource};

struct Config {
    samples: usize,
    batch_size: usize,
    epochs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            samples: 250,
            batch_size: 32,
            epochs: 3,
        }
    }
}

fn parse_args() -> Config {
    let mut config = Config::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--samples" if i + 1 < args.len() => {
                config.samples = args[i + 1].parse().expect("--samples takes a number");
                i += 2;
            }
            "--batch-size" if i + 1 < args.len() => {
                config.batch_size = args[i + 1].parse().expect("--batch-size takes a number");
                i += 2;
            }
            "--epochs" if i + 1 < args.len() => {
                config.epochs = args[i + 1].parse().expect("--epochs takes a number");
                i += 2;
            }
            other => {
                eprintln!("unknown argument: {other}");
                std::process::exit(1);
            }
        }
    }
    config
}

fn run_epochs<S: SampleSource>(mut batcher: Batcher<S>, epochs: usize) -> Result<()> {
    for epoch in 0..epochs {
        let mut batches = 0;
        let mut padded = 0;
        while batcher.advance()? {
            let batch = batcher.batch()?;
            batches += 1;
            if batch.padding > 0 {
                padded += batch.padding;
                println!(
                    "  epoch {epoch}: batch {batches} carries {} padding slots (first index {})",
                    batch.padding, batch.indices[0]
                );
            }
        }
        println!("  epoch {epoch}: {batches} batches, {padded} padding slots total");
        batcher.restart()?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let config = parse_args();

    println!(
        "streaming {} synthetic samples in batches of {} for {} epochs",
        config.samples, config.batch_size, config.epochs
    );

    let shape = [3, 16, 16];

    println!("round-robin batches:");
    let source = InMemorySource::synthetic(config.samples, shape, 10).expect("synthetic source");
    let source = TransformSource::new(source, Box::new(Normalize::new(1.0)));
    let batcher = Batcher::new(
        source,
        BatchConfig::default()
            .batch_size(config.batch_size)
            .input_shape(shape),
    )
    .expect("batcher");
    run_epochs(batcher, config.epochs).expect("round-robin run");

    println!("declared-padding batches:");
    let source = InMemorySource::synthetic(config.samples, shape, 10).expect("synthetic source");
    let batcher = Batcher::new(
        source,
        BatchConfig::default()
            .batch_size(config.batch_size)
            .input_shape(shape)
            .round_batch(false),
    )
    .expect("batcher");
    run_epochs(batcher, config.epochs).expect("declared-padding run");
}
