// Copyright (c) 2026 The sevec contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use proptest::prelude::*;

use crate::{Vector, VectorBehaviour, VectorConfig, VectorError};

#[derive(Debug, Clone)]
enum Op {
    Push(u32),
    Pop,
    Resize(usize),
    Reserve(usize),
    Shrink(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u32>().prop_map(Op::Push),
        Just(Op::Pop),
        (0..80usize).prop_map(Op::Resize),
        (0..80usize).prop_map(Op::Reserve),
        (0..80usize).prop_map(Op::Shrink),
    ]
}

fn apply(vec: &mut Vector<u32>, op: &Op) -> Result<(), VectorError> {
    match *op {
        Op::Push(value) => vec.push(value).map(|_| ()),
        Op::Pop => vec.pop().map(|_| ()),
        Op::Resize(size) => vec.resize(size, 0),
        Op::Reserve(capacity) => vec.reserve(capacity),
        Op::Shrink(capacity) => vec.shrink(capacity),
    }
}

proptest! {
    #[test]
    fn push_grows_len_by_one_up_to_max_size(
        max_size in 0..64usize,
        growth_rate in 1.0f32..4.0,
        pushes in 0..128usize,
    ) {
        let config = VectorConfig::default()
            .with_max_size(max_size)
            .with_growth_rate(growth_rate);
        let mut vec = Vector::<u32>::create(config).expect("Failed to create(..)");
        let limit = if max_size == 0 { usize::MAX } else { max_size };

        for i in 0..pushes {
            let before = vec.len();

            match vec.push(i as u32) {
                Ok(_) => prop_assert_eq!(vec.len(), before + 1),
                Err(e) => {
                    prop_assert_eq!(e, VectorError::CapacityExceeded);
                    prop_assert_eq!(before, limit);
                    prop_assert_eq!(vec.len(), before);
                }
            }

            prop_assert!(vec.len() <= limit);
            prop_assert!(vec.capacity() >= vec.len());
            prop_assert!(vec.capacity() <= limit);
        }
    }

    #[test]
    fn capacity_covers_len_after_any_success(
        ops in prop::collection::vec(op_strategy(), 0..64),
        max_size in 0..64usize,
    ) {
        let mut vec = Vector::<u32>::create(VectorConfig::default().with_max_size(max_size))
            .expect("Failed to create(..)");

        for op in &ops {
            let _ = apply(&mut vec, op);

            prop_assert!(vec.len() <= vec.capacity());
            prop_assert!(vec.capacity() <= vec.max_size());
        }
    }

    #[test]
    fn pops_return_pushes_in_reverse(
        values in prop::collection::vec(any::<u32>(), 0..200),
    ) {
        let mut vec = Vector::<u32>::new();
        for value in &values {
            vec.push(*value).expect("Failed to push(..)");
        }

        let mut popped = Vec::new();
        while let Ok(value) = vec.pop() {
            popped.push(value);
        }
        popped.reverse();

        prop_assert_eq!(popped, values);
        prop_assert_eq!(vec.pop(), Err(VectorError::Empty));
    }

    #[test]
    fn shrink_below_len_truncates_and_keeps_prefix(
        values in prop::collection::vec(any::<u32>(), 1..100),
        cut in 0..100usize,
    ) {
        let k = cut % values.len();
        let mut vec = Vector::<u32>::new();
        vec.extend_from_slice(&values).expect("Failed to extend_from_slice(..)");

        vec.shrink(k).expect("Failed to shrink(..)");

        prop_assert_eq!(vec.len(), k);
        prop_assert_eq!(vec.capacity(), k);
        prop_assert_eq!(vec.as_slice(), &values[..k]);
    }

    #[test]
    fn failed_operations_leave_vector_untouched(
        values in prop::collection::vec(any::<u32>(), 0..32),
        max_size in 1..48usize,
        ops in prop::collection::vec(op_strategy(), 1..32),
        fail_alloc in any::<bool>(),
    ) {
        let mut vec = Vector::<u32>::create(VectorConfig::default().with_max_size(max_size))
            .expect("Failed to create(..)");
        let keep = values.len().min(max_size);
        vec.extend_from_slice(&values[..keep]).expect("Failed to extend_from_slice(..)");

        if fail_alloc {
            vec.change_behaviour(VectorBehaviour::FailAtAlloc);
        }

        for op in &ops {
            let header = vec.header();
            let data = vec.as_slice().to_vec();

            if apply(&mut vec, op).is_err() {
                prop_assert_eq!(vec.header(), header);
                prop_assert_eq!(vec.as_slice(), &data[..]);
            }
        }
    }
}
