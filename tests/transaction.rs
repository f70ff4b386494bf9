use std::fs;

use onestop::config::{self, ConstantValue, Constants, keys};
use onestop::error::TransactionError;
use onestop::policy::{Customer, PolicyApplication};
use onestop::premium::Coverage;
use onestop::types::{PaymentMethod, PolicyNumber, Province};
use onestop::PolicyDesk;

fn application(payment_method: PaymentMethod) -> PolicyApplication {
    PolicyApplication {
        customer: Customer {
            first_name: "Ravi".to_string(),
            last_name: "Okafor".to_string(),
            address: "400 Portage Ave".to_string(),
            city: "Winnipeg".to_string(),
            province: Province::MB,
            postal_code: "R3C 0C4".to_string(),
            phone_number: "204-555-0199".to_string(),
        },
        num_cars: 2,
        coverage: Coverage { extra_liability: true, glass_coverage: false, loaner_car: true },
        payment_method,
        down_payment: 0.0,
        claims: Vec::new(),
    }
}

fn write_constants(dir: &std::path::Path, constants: &Constants) -> std::path::PathBuf {
    let path = dir.join("Const.dat");
    config::save(&path, constants).unwrap();
    path
}

#[test]
fn full_payment_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let constants_path = write_constants(dir.path(), &Constants::canonical());
    let log_path = dir.path().join("policies.json");
    let mut desk = PolicyDesk::open(&constants_path, &log_path).unwrap();

    let record = desk.issue(application(PaymentMethod::Full)).unwrap();

    assert_eq!(record.policy_number, PolicyNumber(1));
    assert_eq!(record.total_premium, 1090.0);
    assert!((record.hst - 141.7).abs() < 1e-9);
    assert_eq!(record.total_cost, 1231.7);
    assert_eq!(record.monthly_payment, 0.0);

    let line = fs::read_to_string(&log_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
    assert_eq!(v["payment_method"], "FULL");
    assert_eq!(v["total_cost"], 1231.7);
}

#[test]
fn monthly_payment_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let constants_path = write_constants(dir.path(), &Constants::canonical());
    let mut desk = PolicyDesk::open(&constants_path, dir.path().join("policies.json")).unwrap();

    let record = desk.issue(application(PaymentMethod::Monthly)).unwrap();

    assert_eq!(record.total_cost, 1241.7);
    assert_eq!(record.monthly_payment, 155.2125);
}

#[test]
fn counter_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut start = Constants::canonical();
    start.insert(keys::NEXT_POLICY_NUMBER, 1944);
    let constants_path = write_constants(dir.path(), &start);
    let log_path = dir.path().join("policies.json");

    {
        let mut desk = PolicyDesk::open(&constants_path, &log_path).unwrap();
        desk.issue(application(PaymentMethod::Full)).unwrap();
    }
    let mut desk = PolicyDesk::open(&constants_path, &log_path).unwrap();
    let second = desk.issue(application(PaymentMethod::Full)).unwrap();

    assert_eq!(second.policy_number, PolicyNumber(1945));
    let reloaded = config::load(&constants_path).unwrap();
    assert_eq!(reloaded.get(keys::NEXT_POLICY_NUMBER), Some(ConstantValue::Int(1946)));
    assert_eq!(fs::read_to_string(&log_path).unwrap().lines().count(), 2);
}

#[test]
fn rewrite_keeps_other_constants_and_their_order() {
    let dir = tempfile::tempdir().unwrap();
    let constants_path = dir.path().join("Const.dat");
    fs::write(
        &constants_path,
        "next_policy_number=7\nbasic_premium=500\ndiscount_per_additional_car=0.1\n\
         extra_liability_cost=50\nglass_coverage_cost=30\nloaner_car_cost=20\n\
         hst_rate=0.13\nprocessing_fee=10.0\n",
    )
    .unwrap();
    let mut desk = PolicyDesk::open(&constants_path, dir.path().join("policies.json")).unwrap();

    desk.issue(application(PaymentMethod::Monthly)).unwrap();

    let text = fs::read_to_string(&constants_path).unwrap();
    assert!(text.starts_with("next_policy_number=8\nbasic_premium=500\n"));
    assert!(text.ends_with("processing_fee=10.0\n"));
}

#[test]
fn missing_glass_cost_aborts_without_writes() {
    let dir = tempfile::tempdir().unwrap();
    let mut constants = Constants::canonical();
    constants.remove(keys::GLASS_COVERAGE_COST);
    let constants_path = write_constants(dir.path(), &constants);
    let log_path = dir.path().join("policies.json");
    let before = fs::read_to_string(&constants_path).unwrap();
    let mut desk = PolicyDesk::open(&constants_path, &log_path).unwrap();

    let err = desk.issue(application(PaymentMethod::Full)).unwrap_err();

    match err {
        TransactionError::MissingConstant(e) => assert_eq!(e.key(), "glass_coverage_cost"),
        other => panic!("expected MissingConstant, got {other:?}"),
    }
    assert!(!log_path.exists());
    assert_eq!(fs::read_to_string(&constants_path).unwrap(), before);
}

#[test]
fn malformed_constants_file_refuses_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let constants_path = dir.path().join("Const.dat");
    fs::write(&constants_path, "basic_premium=500\nhst_rate 0.13\n").unwrap();

    let err = PolicyDesk::open(&constants_path, dir.path().join("policies.json"));
    assert!(matches!(err, Err(onestop::ConfigError::Malformed { line: 2, .. })));
}
