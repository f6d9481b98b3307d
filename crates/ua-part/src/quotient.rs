//! Congruence compatibility checking and quotient construction.

use ua_core::errors::{ErrorInfo, UaError};
use ua_core::{Algebra, TableAlgebra, TableOp};

use crate::Partition;

/// Checks that a partition is compatible with every operation of the algebra.
///
/// This is the boundary check for externally constructed partitions: values
/// produced by the closure engine are congruences by construction and never
/// need it. The check substitutes each generating pair into every operation
/// at every position against every tuple of the remaining coordinates;
/// transitivity extends the verdict to all related pairs.
pub fn verify_congruence(alg: &dyn Algebra, partition: &Partition) -> Result<(), UaError> {
    let n = alg.universe_size();
    if partition.universe_size() != n {
        return Err(UaError::InvalidArgument(
            ErrorInfo::new("size-mismatch", "partition does not match the algebra's universe")
                .with_context("partition", partition.universe_size())
                .with_context("universe", n),
        ));
    }
    let pairs = partition.generating_pairs();
    for (op_idx, op) in alg.operations().iter().enumerate() {
        let arity = op.arity();
        if arity == 0 {
            continue;
        }
        for &(a, b) in &pairs {
            for position in 0..arity {
                let mut rest = vec![0usize; arity - 1];
                loop {
                    let mut args_a = rest[..position].to_vec();
                    args_a.push(a);
                    args_a.extend_from_slice(&rest[position..]);
                    let mut args_b = rest[..position].to_vec();
                    args_b.push(b);
                    args_b.extend_from_slice(&rest[position..]);
                    let left = op.value_at(&args_a);
                    let right = op.value_at(&args_b);
                    if !partition.is_related(left, right) {
                        return Err(UaError::NotCongruence(
                            ErrorInfo::new(
                                "incompatible-operation",
                                "partition is not compatible with an operation",
                            )
                            .with_context("operation", op_idx)
                            .with_context("position", position)
                            .with_context("pair", format!("({a}, {b})"))
                            .with_context("images", format!("({left}, {right})")),
                        ));
                    }
                    if !advance(&mut rest, n) {
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Builds the quotient algebra of `alg` by the congruence `theta`.
///
/// Quotient elements are `theta`-blocks numbered in ascending order of their
/// least element; operations are tabulated on block representatives. The
/// compatibility of `theta` is an invariant of how congruences are produced
/// and is re-checked here only in debug builds.
pub fn quotient_algebra(alg: &dyn Algebra, theta: &Partition) -> Result<TableAlgebra, UaError> {
    let n = alg.universe_size();
    if theta.universe_size() != n {
        return Err(UaError::InvalidArgument(
            ErrorInfo::new("size-mismatch", "partition does not match the algebra's universe")
                .with_context("partition", theta.universe_size())
                .with_context("universe", n),
        ));
    }
    #[cfg(debug_assertions)]
    verify_congruence(alg, theta)?;

    let reps: Vec<usize> = theta.blocks().iter().map(|block| block[0]).collect();
    let block_of = theta.block_indices();
    let m = reps.len();
    let mut tables = Vec::with_capacity(alg.operations().len());
    for op in alg.operations() {
        let arity = op.arity();
        let table = TableOp::from_fn(m, arity, |args| {
            let lifted: Vec<usize> = args.iter().map(|&block| reps[block]).collect();
            block_of[op.value_at(&lifted)]
        })?;
        tables.push(table);
    }
    TableAlgebra::new(m, tables)
}

/// Projects a coarser partition into the quotient universe of `theta`.
///
/// `beta` must lie above `theta`; the image relates two `theta`-blocks
/// exactly when their members are `beta`-related.
pub fn project_partition(theta: &Partition, beta: &Partition) -> Result<Partition, UaError> {
    if !theta.leq(beta)? {
        return Err(UaError::InvalidArgument(
            ErrorInfo::new("not-coarser", "partition to project must lie above the quotient")
                .with_context("quotient_blocks", theta.number_of_blocks())
                .with_context("projected_blocks", beta.number_of_blocks()),
        ));
    }
    let block_of = theta.block_indices();
    let mut image = Partition::zero(theta.number_of_blocks());
    for (a, b) in beta.generating_pairs() {
        image.union(block_of[a], block_of[b]);
    }
    Ok(image)
}

/// Advances a mixed-radix odometer; returns false once it wraps to zero.
fn advance(digits: &mut [usize], radix: usize) -> bool {
    for digit in digits.iter_mut().rev() {
        *digit += 1;
        if *digit < radix {
            return true;
        }
        *digit = 0;
    }
    false
}
