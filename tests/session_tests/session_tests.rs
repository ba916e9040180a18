//! Tests for the Session Controller
//!
//! These tests verify:
//! - State machine ordering (NotReady before init)
//! - Both seeding policies
//! - Idempotent init, reset, rebinding
//! - Recovery of sequence state from an existing log
//! - Failed commands leave the log untouched

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use seqlog::config::{Config, OverflowPolicy, SeedPolicy, SyncStrategy};
use seqlog::protocol::{Command, Response};
use seqlog::record::RECORD_SIZE;
use seqlog::{SeqLogError, Session};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_path() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("fibonacci");
    (temp_dir, log_path)
}

fn config(seed_policy: SeedPolicy) -> Config {
    Config::builder()
        .sync_strategy(SyncStrategy::EveryWrite)
        .seeds(0, 1)
        .seed_policy(seed_policy)
        .build()
}

// =============================================================================
// State Machine Tests
// =============================================================================

#[test]
fn test_commands_before_init_fail() {
    let mut session = Session::new(Config::default()).unwrap();

    assert!(!session.is_ready());
    assert!(matches!(session.step(), Err(SeqLogError::NotReady("step"))));
    assert!(matches!(session.get_data(), Err(SeqLogError::NotReady("getData"))));
    assert!(matches!(session.reset(), Err(SeqLogError::NotReady("reset"))));
    assert!(session.path().is_none());
}

#[test]
fn test_init_makes_session_ready() {
    let (_temp, log_path) = setup_temp_path();
    let mut session = Session::new(Config::default()).unwrap();

    session.init(&log_path).unwrap();

    assert!(session.is_ready());
    assert_eq!(session.path(), Some(log_path.as_path()));
    assert!(log_path.exists());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = Config::builder()
        .sync_strategy(SyncStrategy::EveryNEntries { count: 0 })
        .build();

    assert!(matches!(Session::new(config), Err(SeqLogError::Config(_))));
}

// =============================================================================
// Seeding Policy Tests
// =============================================================================

#[test]
fn test_seed_at_init_writes_seeds() {
    let (_temp, log_path) = setup_temp_path();
    let session = Session::open(config(SeedPolicy::AtInit), &log_path).unwrap();

    assert_eq!(session.get_data().unwrap(), vec![0, 1]);
}

#[test]
fn test_seed_at_init_three_steps() {
    let (_temp, log_path) = setup_temp_path();
    let mut session = Session::open(config(SeedPolicy::AtInit), &log_path).unwrap();

    for _ in 0..3 {
        session.step().unwrap();
    }

    assert_eq!(session.get_data().unwrap(), vec![0, 1, 1, 2, 3]);
}

#[test]
fn test_seed_at_init_four_steps() {
    let (_temp, log_path) = setup_temp_path();
    let mut session = Session::open(config(SeedPolicy::AtInit), &log_path).unwrap();

    let appended: Vec<u32> = (0..4).map(|_| session.step().unwrap()).collect();

    assert_eq!(appended, vec![1, 2, 3, 5]);
    assert_eq!(session.get_data().unwrap(), vec![0, 1, 1, 2, 3, 5]);
}

#[test]
fn test_lazy_seeds_four_steps() {
    let (_temp, log_path) = setup_temp_path();
    let mut session = Session::open(config(SeedPolicy::Lazy), &log_path).unwrap();
    assert!(session.get_data().unwrap().is_empty());

    for _ in 0..4 {
        session.step().unwrap();
    }

    assert_eq!(session.get_data().unwrap(), vec![0, 1, 1, 2]);
}

#[test]
fn test_seed_at_init_tops_up_single_record() {
    let (_temp, log_path) = setup_temp_path();
    {
        let mut session = Session::open(config(SeedPolicy::Lazy), &log_path).unwrap();
        session.step().unwrap();
    }

    let session = Session::open(config(SeedPolicy::AtInit), &log_path).unwrap();

    assert_eq!(session.get_data().unwrap(), vec![0, 1]);
}

// =============================================================================
// Init Tests
// =============================================================================

#[test]
fn test_init_twice_is_idempotent() {
    let (_temp, log_path) = setup_temp_path();
    let mut session = Session::new(config(SeedPolicy::AtInit)).unwrap();

    session.init(&log_path).unwrap();
    session.step().unwrap();
    let once = session.get_data().unwrap();

    session.init(&log_path).unwrap();
    assert_eq!(session.get_data().unwrap(), once);

    session.init(&log_path).unwrap();
    assert_eq!(session.get_data().unwrap(), vec![0, 1, 1]);
}

#[test]
fn test_init_rebinds_to_new_path() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first");
    let second = temp_dir.path().join("second");

    let mut session = Session::open(config(SeedPolicy::AtInit), &first).unwrap();
    session.step().unwrap();

    session.init(&second).unwrap();
    assert_eq!(session.path(), Some(second.as_path()));
    assert_eq!(session.get_data().unwrap(), vec![0, 1]);

    // The first log is untouched
    let first_session = Session::open(config(SeedPolicy::AtInit), &first).unwrap();
    assert_eq!(first_session.get_data().unwrap(), vec![0, 1, 1]);
}

#[test]
fn test_new_session_continues_existing_log() {
    let (_temp, log_path) = setup_temp_path();
    {
        let mut session = Session::open(config(SeedPolicy::AtInit), &log_path).unwrap();
        for _ in 0..5 {
            session.step().unwrap();
        }
    }

    let mut session = Session::open(config(SeedPolicy::AtInit), &log_path).unwrap();
    assert_eq!(session.step().unwrap(), 13);
    assert_eq!(session.get_data().unwrap(), vec![0, 1, 1, 2, 3, 5, 8, 13]);
}

// =============================================================================
// Reset Tests
// =============================================================================

#[test]
fn test_reset_clears_data() {
    let (_temp, log_path) = setup_temp_path();
    let mut session = Session::open(config(SeedPolicy::AtInit), &log_path).unwrap();
    for _ in 0..7 {
        session.step().unwrap();
    }

    let after_reset = session.reset().unwrap();

    assert!(after_reset.is_empty());
    assert!(session.get_data().unwrap().is_empty());
    assert!(session.is_ready());
    assert_eq!(fs::metadata(&log_path).unwrap().len(), 0);
}

#[test]
fn test_step_after_reset_restarts_from_seeds() {
    let (_temp, log_path) = setup_temp_path();
    let mut session = Session::open(config(SeedPolicy::AtInit), &log_path).unwrap();
    session.step().unwrap();
    session.reset().unwrap();

    assert_eq!(session.step().unwrap(), 0);
    assert_eq!(session.step().unwrap(), 1);
    assert_eq!(session.step().unwrap(), 1);
    assert_eq!(session.get_data().unwrap(), vec![0, 1, 1]);
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_step_on_torn_log_fails_without_writing() {
    let (_temp, log_path) = setup_temp_path();
    let mut session = Session::open(config(SeedPolicy::AtInit), &log_path).unwrap();
    session.step().unwrap();

    let mut file = OpenOptions::new().append(true).open(&log_path).unwrap();
    file.write_all(&[0x01]).unwrap();
    let len_before = fs::metadata(&log_path).unwrap().len();

    assert!(matches!(
        session.step(),
        Err(SeqLogError::TruncatedRecord { offset: 12, trailing: 1 })
    ));
    assert!(matches!(
        session.get_data(),
        Err(SeqLogError::TruncatedRecord { .. })
    ));
    assert_eq!(fs::metadata(&log_path).unwrap().len(), len_before);
}

#[test]
fn test_step_overflow_fail_leaves_log_unchanged() {
    let (_temp, log_path) = setup_temp_path();
    let config = Config::builder()
        .seeds(u32::MAX, 1)
        .overflow_policy(OverflowPolicy::Fail)
        .build();
    let mut session = Session::open(config, &log_path).unwrap();

    assert!(matches!(
        session.step(),
        Err(SeqLogError::Overflow { a: u32::MAX, b: 1 })
    ));
    assert_eq!(session.get_data().unwrap(), vec![u32::MAX, 1]);
    assert_eq!(
        fs::metadata(&log_path).unwrap().len(),
        2 * RECORD_SIZE as u64
    );
}

#[test]
fn test_step_overflow_wrap() {
    let (_temp, log_path) = setup_temp_path();
    let config = Config::builder().seeds(u32::MAX, 2).build();
    let mut session = Session::open(config, &log_path).unwrap();

    assert_eq!(session.step().unwrap(), 1);
}

#[test]
fn test_reset_recovers_torn_log() {
    let (_temp, log_path) = setup_temp_path();
    let mut session = Session::open(config(SeedPolicy::AtInit), &log_path).unwrap();

    let mut file = OpenOptions::new().append(true).open(&log_path).unwrap();
    file.write_all(&[0x01, 0x02]).unwrap();
    assert!(session.get_data().is_err());

    session.reset().unwrap();
    session.step().unwrap();
    assert_eq!(session.get_data().unwrap(), vec![0]);
}

// =============================================================================
// Command Execution Tests
// =============================================================================

#[test]
fn test_execute_command_surface() {
    let (_temp, log_path) = setup_temp_path();
    let mut session = Session::new(config(SeedPolicy::AtInit)).unwrap();

    assert!(matches!(
        session.execute(Command::Step),
        Err(SeqLogError::NotReady(_))
    ));

    assert_eq!(
        session
            .execute(Command::Init { path: log_path.clone() })
            .unwrap(),
        Response::Done
    );
    assert_eq!(session.execute(Command::Step).unwrap(), Response::Appended(1));
    assert_eq!(session.execute(Command::Step).unwrap(), Response::Appended(2));
    assert_eq!(
        session.execute(Command::GetData).unwrap(),
        Response::Data(vec![0, 1, 1, 2])
    );
    assert_eq!(
        session.execute(Command::Reset).unwrap(),
        Response::Data(vec![])
    );
    assert_eq!(
        session.execute(Command::GetData).unwrap(),
        Response::Data(vec![])
    );
}
