use serde::Serialize;

/// Ticket number in `[1, ticket_count]`.
pub type Ticket = u64;

/// One student: an ordered sequence of text fields (name parts, group id, ...).
/// No fixed arity; the fields themselves are the record's identity for hashing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StudentRecord {
    pub fields: Vec<String>,
}

impl StudentRecord {
    pub fn new<T: Into<String>>(fields: Vec<T>) -> Self {
        Self { fields: fields.into_iter().map(Into::into).collect() }
    }

    pub fn len(&self) -> usize { self.fields.len() }
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }
}

/// A record paired with its computed ticket; the output unit of a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TicketAssignment {
    pub record: StudentRecord,
    pub ticket: Ticket,
}

/// Ticket column of an assignment sequence, in order.
pub fn tickets(assignments: &[TicketAssignment]) -> Vec<Ticket> {
    assignments.iter().map(|a| a.ticket).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_from_str_fields() {
        let r = StudentRecord::new(vec!["Alice", "Group1"]);
        assert_eq!(r.fields, vec!["Alice".to_string(), "Group1".to_string()]);
        assert_eq!(r.len(), 2);
        assert!(!r.is_empty());
    }

    #[test]
    fn empty_record_is_legal() {
        let r = StudentRecord::new(Vec::<String>::new());
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
    }

    #[test]
    fn tickets_column_preserves_order() {
        let make = |f: &str, t: u64| TicketAssignment {
            record: StudentRecord::new(vec![f]),
            ticket: t,
        };
        let batch = vec![make("a", 3), make("b", 1), make("c", 3)];
        assert_eq!(tickets(&batch), vec![3, 1, 3]);
    }
}
