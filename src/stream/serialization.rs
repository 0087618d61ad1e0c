//! Serde support: a stream serializes as a sequence of its elements.
//!
//! Serializing forces the whole stream and therefore never finishes for an
//! infinite one; `take` it first. Deserializing builds a realized stream.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::LazyStream;

impl<T: Serialize> Serialize for LazyStream<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(None)?;
        let mut current = self.clone();
        while let Some(node) = current.node.take() {
            seq.serialize_element(&node.head)?;
            current = node.force_tail();
        }
        seq.end()
    }
}

struct LazyStreamVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for LazyStreamVisitor<T> {
    type Value = LazyStream<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(elements.into_iter().collect())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for LazyStream<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(LazyStreamVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_serialize_bounded_infinite_stream() {
        let json = serde_json::to_string(&LazyStream::from(1).take(3)).unwrap();
        assert_eq!(json, "[1,2,3]");
    }

    #[rstest]
    fn test_deserialize_is_realized() {
        let stream: LazyStream<String> = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert!(stream.is_tail_realized());
        assert_eq!(stream.to_list(), vec!["a".to_string(), "b".to_string()]);
    }
}
