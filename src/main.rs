use tracing::Level;
use workflow_sql::{Config, ExportError, ExporterBuilder};

fn main() -> Result<(), ExportError> {
    init_tracing();

    let exporter = ExporterBuilder::new().config(Config::default()).build()?;
    let report = exporter.export()?;
    println!("{}", report);

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::WARN)
        .try_init();
}
