use super::*;
use std::io::Write;
use std::sync::Mutex;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn default_filter_hides_rejection_causes() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(DEFAULT_LOG_FILTER))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!(target: "cartstore::cart::store", product_id = 1, "cart operation rejected");
        TracingNotifier.error("Requested quantity is out of stock");
    });

    let out = captured.text();
    assert!(!out.contains("cart operation rejected"), "{out}");
    assert!(out.contains("Requested quantity is out of stock"), "{out}");
}

#[test]
fn log_toasts_flag_parses() {
    let cli = Cli::try_parse_from(["cart", "--log-toasts", "add", "3"]).unwrap();
    assert!(cli.log_toasts);
    assert!(matches!(cli.command, Command::Add { product_id: 3 }));
}

#[test]
fn update_accepts_negative_amount() {
    let cli = Cli::try_parse_from(["cart", "update", "1", "-2"]).unwrap();
    assert!(matches!(cli.command, Command::Update { product_id: 1, amount: -2 }));
}
