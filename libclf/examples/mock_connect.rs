// Connect loop walkthrough against the mock driver.

// Run with `RUST_LOG=debug` to watch every candidate the dispatcher tries.

use std::time::Duration;

use libclf::driver::{MockDriver, MockReply};
use libclf::prelude::*;
use libclf::test_support::tta_response;

fn main() -> Result<()> {
    env_logger::init();

    let mock = MockDriver::new();
    // Nothing on the first round, then a Type 2 tag shows up.
    mock.push_sense(Protocol::Tta, MockReply::Nothing);
    mock.push_sense(Protocol::Tta, MockReply::Found(tta_response()));

    let mut clf = ContactlessFrontend::with_driver(mock.clone());

    println!("=== Reader/writer ===");
    let options = ConnectOptions::new().rdwr(
        ReaderOptions::new()
            .iterations(5)
            .interval(Duration::from_millis(50))
            .on_connect(|target| {
                println!("connected: {}", target);
                true
            }),
    );
    match clf.connect(options)? {
        ConnectOutcome::Connected(target) => {
            println!("UID: {}", print_data(target.get(&Field::SddRes)));
        }
        ConnectOutcome::Absent => println!("no target"),
        ConnectOutcome::Aborted(e) => println!("aborted: {}", e),
    }

    println!("\n=== Card emulation ===");
    let options = ConnectOptions::from_json(&serde_json::json!({
        "card": { "iterations": 2, "timeout": 0.1 }
    }))?;
    match clf.connect(options)? {
        ConnectOutcome::Connected(target) => println!("activated: {}", target),
        ConnectOutcome::Absent => println!("no reader"),
        ConnectOutcome::Aborted(e) => println!("aborted: {}", e),
    }

    println!("\n{} driver calls", mock.calls().len());
    clf.close();
    Ok(())
}
