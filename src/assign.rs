// src/assign.rs
//! Hash-to-ticket mapping: Keccak-512 keyed by a shared distribution
//! parameter, reduced into `[1, ticket_count]`.
//!
//! The digest is the original Keccak (pre-NIST padding), not SHA3-512;
//! swapping the two silently changes every ticket.

use sha3::{Digest, Keccak512};

use crate::error::ShuffleError;
use crate::par::parallel_map_indexed;
use crate::types::{StudentRecord, Ticket, TicketAssignment};

/// Width of the frozen parameter buffer.
pub const PARAM_BYTES: usize = 32;

/// Deterministic ticket assignment: the same (ticket_count, parameter,
/// fields) always map to the same ticket. Immutable after construction; no
/// per-call state.
#[derive(Clone, Debug)]
pub struct TicketAssigner {
    ticket_count: u64,
    param: [u8; PARAM_BYTES],
}

impl TicketAssigner {
    /// Fails eagerly on a zero ticket count: there is no modulo range and
    /// nothing may be hashed under an invalid configuration.
    pub fn new(ticket_count: u64, parameter: i64) -> Result<Self, ShuffleError> {
        if ticket_count == 0 {
            return Err(ShuffleError::InvalidTicketCount);
        }
        Ok(Self { ticket_count, param: encode_parameter(parameter) })
    }

    pub fn ticket_count(&self) -> u64 { self.ticket_count }

    /// The canonical 32-byte little-endian form of the distribution parameter.
    pub fn parameter_bytes(&self) -> &[u8; PARAM_BYTES] { &self.param }

    /// Ticket for one record: Keccak-512(param || field_1 || ... || field_k),
    /// fields as UTF-8 with no separator, digest read as an unsigned
    /// big-endian integer, reduced mod ticket_count, plus one.
    pub fn ticket_for(&self, record: &StudentRecord) -> Ticket {
        let mut hasher = Keccak512::new();
        hasher.update(self.param);
        for field in &record.fields {
            hasher.update(field.as_bytes());
        }
        let digest = hasher.finalize();
        reduce_be(digest.as_slice(), self.ticket_count) + 1
    }

    /// Batch assignment, input order preserved. Empty in, empty out.
    pub fn assign_tickets(&self, records: Vec<StudentRecord>) -> Vec<TicketAssignment> {
        records
            .into_iter()
            .map(|record| {
                let ticket = self.ticket_for(&record);
                TicketAssignment { record, ticket }
            })
            .collect()
    }

    /// Same output as `assign_tickets`, hashed across `threads` workers.
    /// Order is preserved by indexed scatter-gather, never concurrent append.
    pub fn assign_tickets_par(
        &self,
        records: Vec<StudentRecord>,
        threads: usize,
    ) -> Vec<TicketAssignment> {
        let tickets = parallel_map_indexed(&records, threads, |r, _| self.ticket_for(r));
        records
            .into_iter()
            .zip(tickets)
            .map(|(record, ticket)| TicketAssignment { record, ticket })
            .collect()
    }
}

/// Two's-complement little-endian, sign-extended to the full buffer.
/// Total over i64: every value fits the 32 bytes, so there is no overflow path.
fn encode_parameter(p: i64) -> [u8; PARAM_BYTES] {
    let mut buf = if p < 0 { [0xFF; PARAM_BYTES] } else { [0u8; PARAM_BYTES] };
    buf[..8].copy_from_slice(&p.to_le_bytes());
    buf
}

/// Big-endian bytes as an unsigned integer, reduced mod `n`. The 512-bit
/// value never materializes: the remainder is folded in byte by byte
/// (rem < n <= 2^64, so rem * 256 + b fits in u128).
fn reduce_be(bytes: &[u8], n: u64) -> u64 {
    let n = n as u128;
    let mut rem: u128 = 0;
    for &b in bytes {
        rem = ((rem << 8) | b as u128) % n;
    }
    rem as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(fields: &[&str]) -> StudentRecord {
        StudentRecord::new(fields.to_vec())
    }

    #[test]
    fn golden_single_record() {
        // Pinned against a reference Keccak-512 (original padding).
        let a = TicketAssigner::new(100, 42).unwrap();
        assert_eq!(a.ticket_for(&rec(&["Alice", "Group1"])), 2);
    }

    #[test]
    fn golden_more_records() {
        let a = TicketAssigner::new(10, 42).unwrap();
        assert_eq!(a.ticket_for(&rec(&["Ivanov", "Ivan", "IU7-42B"])), 8);

        let b = TicketAssigner::new(25, 2026).unwrap();
        assert_eq!(b.ticket_for(&rec(&["Petrova", "Anna", "IU7-41B"])), 15);
    }

    #[test]
    fn golden_negative_parameter() {
        let a = TicketAssigner::new(1_000_000_007, -1).unwrap();
        assert_eq!(a.ticket_for(&rec(&["Bob", "Group2"])), 320_115_900);
    }

    #[test]
    fn fields_concatenate_without_separator() {
        // ["Alice", "Group1"] and ["AliceGroup1"] feed identical bytes to the
        // hash; this is a property of the format, not a bug.
        let a = TicketAssigner::new(100, 42).unwrap();
        assert_eq!(
            a.ticket_for(&rec(&["Alice", "Group1"])),
            a.ticket_for(&rec(&["AliceGroup1"]))
        );
    }

    #[test]
    fn empty_record_hashes_parameter_only() {
        let a = TicketAssigner::new(7, 0).unwrap();
        assert_eq!(a.ticket_for(&rec(&[])), 2);
    }

    #[test]
    fn deterministic_across_instances() {
        let r = rec(&["Novak", "Jana", "G3"]);
        let a = TicketAssigner::new(500, 17).unwrap();
        let b = TicketAssigner::new(500, 17).unwrap();
        assert_eq!(a.ticket_for(&r), b.ticket_for(&r));
        assert_eq!(a.ticket_for(&r), a.ticket_for(&r));
    }

    #[test]
    fn batch_preserves_order_and_length() {
        let records = vec![rec(&["a"]), rec(&["b"]), rec(&["c", "d"])];
        let a = TicketAssigner::new(1000, 5).unwrap();
        let out = a.assign_tickets(records.clone());
        assert_eq!(out.len(), records.len());
        for (i, assignment) in out.iter().enumerate() {
            assert_eq!(assignment.record, records[i]);
            assert_eq!(assignment.ticket, a.ticket_for(&records[i]));
        }
    }

    #[test]
    fn empty_batch() {
        let a = TicketAssigner::new(10, 1).unwrap();
        assert!(a.assign_tickets(Vec::new()).is_empty());
    }

    #[test]
    fn tickets_stay_in_range() {
        for n in [1u64, 2, 3, 10, 97] {
            let a = TicketAssigner::new(n, 42).unwrap();
            for i in 0..200 {
                let t = a.ticket_for(&rec(&[&format!("s{i}")]));
                assert!((1..=n).contains(&t), "ticket {t} out of [1, {n}]");
            }
        }
    }

    #[test]
    fn single_ticket_forces_one() {
        let a = TicketAssigner::new(1, 123).unwrap();
        for i in 0..50 {
            assert_eq!(a.ticket_for(&rec(&[&format!("s{i}")])), 1);
        }
    }

    #[test]
    fn zero_ticket_count_rejected() {
        assert!(matches!(
            TicketAssigner::new(0, 42),
            Err(ShuffleError::InvalidTicketCount)
        ));
    }

    #[test]
    fn parameter_encoding_is_little_endian_twos_complement() {
        let a = TicketAssigner::new(10, 42).unwrap();
        let mut expect = [0u8; PARAM_BYTES];
        expect[0] = 42;
        assert_eq!(a.parameter_bytes(), &expect);

        let b = TicketAssigner::new(10, -1).unwrap();
        assert_eq!(b.parameter_bytes(), &[0xFF; PARAM_BYTES]);

        let c = TicketAssigner::new(10, -2).unwrap();
        let mut expect = [0xFFu8; PARAM_BYTES];
        expect[0] = 0xFE;
        assert_eq!(c.parameter_bytes(), &expect);
    }

    #[test]
    fn reduce_be_matches_wide_arithmetic() {
        // 0x0102 = 258; 258 % 100 = 58.
        assert_eq!(reduce_be(&[0x01, 0x02], 100), 58);
        assert_eq!(reduce_be(&[0x00; 64], 7), 0);
        assert_eq!(reduce_be(&[0xFF; 8], u64::MAX), 0); // 2^64-1 mod (2^64-1)
        assert_eq!(reduce_be(&[], 13), 0);
    }

    #[test]
    fn parallel_matches_serial() {
        let records: Vec<StudentRecord> =
            (0..300).map(|i| rec(&[&format!("s{i:03}"), "G1"])).collect();
        let a = TicketAssigner::new(97, 3).unwrap();
        let serial = a.assign_tickets(records.clone());
        for threads in [1, 2, 4, 7] {
            assert_eq!(a.assign_tickets_par(records.clone(), threads), serial);
        }
    }
}
