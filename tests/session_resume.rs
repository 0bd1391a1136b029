extern crate fairs;
extern crate serde_json;
extern crate tempfile;

use fairs::ledger::{load, persist, session_path};
use fairs::*;

fn train(resumption: &mut Resumption) {
    for epoch in resumption.from_epoch..resumption.target_epoch {
        resumption.session.record_epoch(
            EpochMetrics::new(epoch)
                .with("loss", 1. / (epoch + 1) as f64)
                .with("accuracy", epoch as f64 / 100.),
            Some(EpochMetrics::new(epoch).with("loss", 2. / (epoch + 1) as f64)),
        )
        .unwrap();
    }
}

#[test]
fn interrupted_training_resumes_on_top_of_completed_epochs() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Configuration::default();
    let ledger = SessionLedger::new(50, cfg.snapshot().unwrap());

    let mut first = ledger.begin_or_resume(dir.path(), 10).unwrap();
    assert_eq!((first.from_epoch, first.target_epoch), (0, 50));
    train(&mut first);
    persist(&first.session, dir.path()).unwrap();

    let mut second = ledger.begin_or_resume(dir.path(), 10).unwrap();
    assert_eq!((second.from_epoch, second.target_epoch), (50, 60));
    assert_eq!(second.prior_history(), first.session.history());
    train(&mut second);
    persist(&second.session, dir.path()).unwrap();

    let stored = load(dir.path()).unwrap();
    assert_eq!(stored.total_epochs_completed(), 60);
    assert_eq!(stored.history().len(), 60);
    assert_eq!(stored.validation_history().map(|v| v.len()), Some(60));
    assert_eq!(stored.history()[..50], first.session.history()[..]);
    let epochs = stored.history().iter().map(|m| m.epoch).collect::<Vec<_>>();
    assert_eq!(epochs, (0..60).collect::<Vec<_>>());
}

#[test]
fn stored_configuration_snapshot_survives_resume() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = Configuration::default();
    cfg.dataset.perceptive_size = 64;

    let first = SessionLedger::from_config(&cfg)
        .unwrap()
        .begin_or_resume(dir.path(), 0)
        .unwrap();
    persist(&first.session, dir.path()).unwrap();

    let later = SessionLedger::from_config(&Configuration::default())
        .unwrap()
        .begin_or_resume(dir.path(), 5)
        .unwrap();
    let snapshot: Configuration =
        serde_json::from_value(later.session.config_snapshot().clone()).unwrap();
    assert_eq!(snapshot.dataset.perceptive_size, 64);
}

#[test]
fn truncated_artifact_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = SessionLedger::new(5, serde_json::json!({}));
    let mut r = ledger.begin_or_resume(dir.path(), 0).unwrap();
    train(&mut r);
    let path = persist(&r.session, dir.path()).unwrap();
    assert_eq!(path, session_path(dir.path()));

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, &text[..text.len() / 2]).unwrap();

    assert!(matches!(
        ledger.begin_or_resume(dir.path(), 10),
        Err(Error::CorruptSession { .. })
    ));
}
