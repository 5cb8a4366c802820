mod common;

use common::{compound, empty_list, list, pos};
use nbt_finder::{Compound, Error, List, Tag, Value};

// ==================== Canonical Strings ====================

#[test]
fn test_integers_print_decimal() {
    assert_eq!(Value::Byte(-5).to_string(), "-5");
    assert_eq!(Value::Short(300).to_string(), "300");
    assert_eq!(Value::Int(64).to_string(), "64");
    assert_eq!(Value::Long(-9_000_000_000).to_string(), "-9000000000");
    assert_eq!(Value::from(true).to_string(), "1");
}

#[test]
fn test_floats_keep_fraction() {
    assert_eq!(Value::Double(64.0).to_string(), "64.0");
    assert_eq!(Value::Double(1.5).to_string(), "1.5");
    assert_eq!(Value::Float(2.25).to_string(), "2.25");
    // widened to f64 before printing
    assert_eq!(Value::Float(0.1).to_string(), "0.10000000149011612");
}

#[test]
fn test_floats_use_signed_exponent_at_extremes() {
    assert_eq!(Value::Double(1e16).to_string(), "1e+16");
    assert_eq!(Value::Double(1.5e-5).to_string(), "1.5e-05");
    assert_eq!(Value::Double(-2.5e120).to_string(), "-2.5e+120");
    assert_eq!(Value::Double(1e-4).to_string(), "0.0001");
    assert_eq!(Value::Double(9999999999999998.0).to_string(), "9999999999999998.0");
    assert_eq!(Value::Double(0.0).to_string(), "0.0");
    assert_eq!(Value::Float(1e20).to_string(), "1.0000000200408773e+20");
}

#[test]
fn test_non_finite_floats() {
    assert_eq!(Value::Double(f64::NAN).to_string(), "nan");
    assert_eq!(Value::Double(f64::INFINITY).to_string(), "inf");
    assert_eq!(Value::Float(f32::NEG_INFINITY).to_string(), "-inf");
}

#[test]
fn test_strings_print_verbatim() {
    assert_eq!(Value::from("minecraft:elytra").to_string(), "minecraft:elytra");
    assert_eq!(Value::from("").to_string(), "");
}

#[test]
fn test_arrays_print_elements_and_containers_summaries() {
    assert_eq!(Value::ByteArray(vec![1, -2]).to_string(), "[1, -2]");
    assert_eq!(Value::IntArray(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
    assert_eq!(Value::LongArray(vec![]).to_string(), "[]");
    assert_eq!(Value::LongArray(vec![1 << 40]).to_string(), "[1099511627776]");
    assert_eq!(pos(1.0, 2.0, 3.0).to_string(), "[3 Double(s)]");
    assert_eq!(empty_list(Tag::End).to_string(), "[0 End(s)]");
    assert_eq!(
        compound([("a", 1i8.into()), ("b", 2i8.into())]).to_string(),
        "{2 entries}"
    );
}

// ==================== Compound ====================

#[test]
fn test_compound_insert_replaces_in_place() {
    let mut compound = Compound::new();
    assert_eq!(compound.insert("a", 1i32), None);
    assert_eq!(compound.insert("b", 2i32), None);
    assert_eq!(compound.insert("a", 3i32), Some(Value::Int(1)));

    let entries: Vec<(&str, &Value)> = compound.iter().collect();
    assert_eq!(entries, [("a", &Value::Int(3)), ("b", &Value::Int(2))]);
    assert_eq!(compound.len(), 2);
}

#[test]
fn test_value_get() {
    let value = compound([("id", "minecraft:cow".into())]);
    assert_eq!(value.get("id").and_then(Value::as_str), Some("minecraft:cow"));
    assert_eq!(value.get("missing"), None);
    assert_eq!(Value::Int(1).get("id"), None);
}

// ==================== List ====================

#[test]
fn test_list_adopts_first_element_kind() {
    let value = list(vec![1i32.into(), 2i32.into()]);
    let list = value.as_list().unwrap();
    assert_eq!(list.element_tag(), Tag::Int);
    assert_eq!(list.get(1), Some(&Value::Int(2)));
    assert_eq!(list.get(2), None);
}

#[test]
fn test_list_rejects_mixed_kinds() {
    match List::try_from_values(vec![1i32.into(), "two".into()]) {
        Err(Error::TagMismatch(3, 8)) => {}
        other => panic!("Expected TagMismatch, got {other:?}"),
    }

    let mut list = List::new(Tag::String);
    assert!(list.push(Value::Int(1)).is_err());
    assert!(list.push("ok".into()).is_ok());
}

#[test]
fn test_as_f64_widens_numbers_only() {
    assert_eq!(Value::Int(3).as_f64(), Some(3.0));
    assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
    assert_eq!(Value::from("3").as_f64(), None);
    assert!(Value::Int(3).is_scalar());
    assert!(Value::IntArray(vec![]).is_scalar());
    assert!(!pos(0.0, 0.0, 0.0).is_scalar());
}
