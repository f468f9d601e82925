use std::collections::HashSet;

use nae3sat_core::{Bqm, BqmError, Embedding, Graph, Record, SampleSet};
use thiserror::Error;

/// Errors that can occur when moving a model onto or off of chains.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmbedError {
    #[error("variable {0} has no chain")]
    MissingChain(usize),

    #[error("no target coupler joins the chains of ({0}, {1})")]
    MissingCoupler(usize, usize),

    #[error("sample set has no value for qubit {0}")]
    MissingQubit(usize),

    #[error(transparent)]
    Model(#[from] BqmError),
}

/// Expands a logical model onto the chains of `embedding` in `target`.
///
/// Each linear bias is split evenly across its chain, and each interaction
/// is split evenly across every target edge joining the two chains. Every
/// target edge inside a chain gets a coupling of `-chain_strength`, and the
/// offset is raised by the same amount per chain edge so that a sample with
/// intact chains has the same energy as its logical counterpart.
///
/// # Errors
///
/// Returns an error if a variable has no chain or an interaction has no
/// target edge between its chains.
pub fn embed_bqm(
    source: &Bqm,
    embedding: &Embedding,
    target: &Graph,
    chain_strength: f64,
) -> Result<Bqm, EmbedError> {
    let chain = |v: usize| embedding.chain(v).ok_or(EmbedError::MissingChain(v));
    let mut embedded = Bqm::new();
    embedded.add_offset(source.offset());

    for (v, bias) in source.linear_terms() {
        let nodes = chain(v)?;
        let share = bias / nodes.len() as f64;
        for &q in nodes {
            embedded.add_linear(q, share);
        }
    }

    for (u, v, bias) in source.interactions() {
        let members: HashSet<usize> = chain(v)?.iter().copied().collect();
        let couplers: Vec<(usize, usize)> = chain(u)?
            .iter()
            .flat_map(|&p| {
                target
                    .neighbors(p)
                    .iter()
                    .filter(|&&q| members.contains(&q))
                    .map(move |&q| (p, q))
            })
            .collect();
        if couplers.is_empty() {
            return Err(EmbedError::MissingCoupler(u, v));
        }
        let share = bias / couplers.len() as f64;
        for (p, q) in couplers {
            embedded.add_quadratic(p, q, share)?;
        }
    }

    for v in source.variables() {
        let nodes = chain(v)?;
        let members: HashSet<usize> = nodes.iter().copied().collect();
        for &p in nodes {
            for &q in target.neighbors(p) {
                if p < q && members.contains(&q) {
                    embedded.add_quadratic(p, q, -chain_strength)?;
                    embedded.add_offset(chain_strength);
                }
            }
        }
    }

    Ok(embedded)
}

/// Maps physical samples back to the logical variables of `source`.
///
/// Each chain is resolved by majority vote; a tied chain takes the value of
/// its first qubit. Rows keep their occurrence counts, record the fraction
/// of chains that disagreed internally, and are re-evaluated on `source`.
///
/// # Errors
///
/// Returns an error if a variable has no chain or a chain qubit is missing
/// from the sample set.
pub fn unembed(
    sampleset: &SampleSet,
    embedding: &Embedding,
    source: &Bqm,
) -> Result<SampleSet, EmbedError> {
    let variables: Vec<usize> = source.variables().collect();

    let columns = variables
        .iter()
        .map(|&v| {
            embedding
                .chain(v)
                .ok_or(EmbedError::MissingChain(v))?
                .iter()
                .map(|&q| {
                    sampleset
                        .variables()
                        .binary_search(&q)
                        .map_err(|_| EmbedError::MissingQubit(q))
                })
                .collect::<Result<Vec<usize>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Vec::with_capacity(sampleset.len());
    for record in sampleset.records() {
        let mut broken: u32 = 0;
        let sample: Vec<i8> = columns
            .iter()
            .map(|chain| {
                let values = chain.iter().map(|&c| record.sample[c]);
                let sum: i32 = values.clone().map(i32::from).sum();
                if values.clone().any(|s| s != record.sample[chain[0]]) {
                    broken += 1;
                }
                match sum.signum() {
                    0 => record.sample[chain[0]],
                    sign => i8::try_from(sign).unwrap_or(1),
                }
            })
            .collect();

        let energy = source.energy(&variables, &sample)?;
        let chain_break_fraction = if variables.is_empty() {
            0.0
        } else {
            f64::from(broken) / variables.len() as f64
        };
        records.push(Record {
            sample,
            energy,
            num_occurrences: record.num_occurrences,
            chain_break_fraction,
        });
    }

    Ok(SampleSet::new(variables, records))
}
