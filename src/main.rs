use news_classifier::{train, ClassifierError, JiebaTokenizer, TrainConfig};

fn init_logger() {
    // RUST_LOG が無ければ info
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

fn main() -> Result<(), ClassifierError> {
    init_logger();

    let config = TrainConfig::from_env();
    log::debug!("{:?}", config);

    let report = train(&config, JiebaTokenizer::new())?;
    println!("用时{}s", report.elapsed.as_secs_f64());
    println!("{}", report.accuracy);

    log::info!(
        "{} train / {} test documents, artifacts: {} {}",
        report.train_docs,
        report.test_docs,
        config.model_file.display(),
        config.vocabulary_file.display()
    );
    Ok(())
}
