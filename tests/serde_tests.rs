#![cfg(feature = "serde")]

//! Integration tests for serde support in lazy-stream.
//!
//! A stream serializes as a plain sequence of its elements and deserializes
//! into a realized stream.

use lazy_stream::stream::LazyStream;
use rstest::rstest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Reading {
    sensor: String,
    value: f64,
}

#[rstest]
fn test_stream_json_roundtrip() {
    let stream = LazyStream::range(1, 6);

    let json = serde_json::to_string(&stream).unwrap();
    assert_eq!(json, "[1,2,3,4,5]");

    let restored: LazyStream<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.to_list(), stream.to_list());
    assert!(restored.is_tail_realized());
}

#[rstest]
fn test_bounded_infinite_stream_serializes() {
    let squares = LazyStream::from(1_u64).map(|n| n * n).take(4);
    assert_eq!(serde_json::to_string(&squares).unwrap(), "[1,4,9,16]");
}

#[rstest]
fn test_empty_stream_serializes_as_empty_array() {
    let empty: LazyStream<i32> = LazyStream::nil();
    assert_eq!(serde_json::to_string(&empty).unwrap(), "[]");

    let restored: LazyStream<i32> = serde_json::from_str("[]").unwrap();
    assert!(restored.is_empty());
}

#[rstest]
fn test_stream_of_structs_roundtrip() {
    let readings: LazyStream<Reading> = vec![
        Reading {
            sensor: "north".to_string(),
            value: 1.5,
        },
        Reading {
            sensor: "south".to_string(),
            value: -0.25,
        },
    ]
    .into_iter()
    .collect();

    let json = serde_json::to_string(&readings).unwrap();
    let restored: LazyStream<Reading> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.to_list(), readings.to_list());
}

#[rstest]
fn test_nested_streams_roundtrip() {
    let rows: LazyStream<LazyStream<u8>> = (0..3).map(|row| LazyStream::range(0, row + 1)).collect();

    let json = serde_json::to_string(&rows).unwrap();
    assert_eq!(json, "[[0],[0,1],[0,1,2]]");

    let restored: LazyStream<LazyStream<u8>> = serde_json::from_str(&json).unwrap();
    let flattened: Vec<Vec<u8>> = restored.iter().map(|row| row.to_list()).collect();
    assert_eq!(flattened, vec![vec![0], vec![0, 1], vec![0, 1, 2]]);
}

#[rstest]
fn test_deserialize_rejects_non_sequence() {
    let result: Result<LazyStream<i32>, _> = serde_json::from_str("{\"head\": 1}");
    assert!(result.is_err());
}
