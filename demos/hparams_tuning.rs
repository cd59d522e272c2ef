//! Hyperparameter Tuning Example
//!
//! Declares a tuning experiment, then runs a few random-search trials, each
//! recorded as an hparams session in its own run directory. Point
//! `tensorboard --logdir logs/hparam_tuning` at the output to browse it.
//!
//! Run with: RUST_LOG=info cargo run --example hparams_tuning

use rand::SeedableRng;
use tracing_subscriber::EnvFilter;
use trueno_hparams::callback::{run_with_callbacks, HParamsCallback, TrainContext, TrainingCallback};
use trueno_hparams::hparams::{
    Discrete, Experiment, HParam, HParamValue, IntInterval, Metric, RealInterval,
};
use trueno_hparams::writer::EventFileWriter;
use trueno_hparams::{Result, WriterConfig};

const LOGDIR: &str = "logs/hparam_tuning";
const TRIALS: usize = 4;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Trueno-Hparams Tuning ===\n");

    // -------------------------------------------------------------------------
    // 1. Declare the experiment
    // -------------------------------------------------------------------------
    let hparams = vec![
        HParam::new("dense_neurons").with_domain(IntInterval::new(4, 16)?),
        HParam::new("dropout").with_domain(RealInterval::new(0.1, 0.4)?),
        HParam::new("optimizer").with_domain(Discrete::new(["adam", "sgd"])?),
    ];
    let metrics = vec![Metric::new("accuracy").with_group("validation")];
    let experiment = Experiment::builder(hparams.clone(), metrics)
        .description("random search over a small dense network")
        .build();

    let mut writer = EventFileWriter::create(&WriterConfig::new(LOGDIR))?;
    trueno_hparams::experiment(Some(&mut writer), &experiment)?;
    writer.close()?;
    println!("1. Experiment written to {}", writer.path().display());

    // -------------------------------------------------------------------------
    // 2. Run trials
    // -------------------------------------------------------------------------
    println!("\n2. Running {TRIALS} trials...");
    let mut rng = rand::rngs::StdRng::seed_from_u64(27);
    for trial in 0..TRIALS {
        let mut values: Vec<(HParam, HParamValue)> = Vec::with_capacity(hparams.len());
        for hparam in &hparams {
            if let Some(domain) = hparam.domain() {
                values.push((hparam.clone(), domain.sample_uniform(&mut rng)?));
            }
        }
        println!("   trial {trial}: {values:?}");

        let config = WriterConfig::new(format!("{LOGDIR}/run-{trial}"));
        let mut callback = HParamsCallback::for_logdir(&config, values.clone())?
            .with_group_name(format!("trial-{trial}"));
        let mut callbacks: [&mut dyn TrainingCallback; 1] = [&mut callback];
        let accuracy = run_with_callbacks(&mut callbacks, &TrainContext::eager(), || {
            Ok::<_, trueno_hparams::Error>(fake_accuracy(&values))
        })?;
        println!("   trial {trial}: accuracy {accuracy:.3}");
    }

    println!("\nDone. View with: tensorboard --logdir {LOGDIR}");
    Ok(())
}

/// Stand-in for a training loop: a smooth function of the hparams.
#[allow(clippy::cast_precision_loss)]
fn fake_accuracy(values: &[(HParam, HParamValue)]) -> f64 {
    values.iter().fold(0.5, |acc, (hparam, value)| match (hparam.name(), value) {
        ("dense_neurons", HParamValue::Int(n)) => acc + *n as f64 / 64.0,
        ("dropout", HParamValue::Float(p)) => acc - (p - 0.2).abs(),
        ("optimizer", HParamValue::Str(s)) if s == "adam" => acc + 0.05,
        _ => acc,
    })
}
