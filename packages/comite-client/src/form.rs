//! Draft records and the single reducer every keystroke goes through.

use comite_api::Member;

use crate::format::{
    format_cedula, format_telefono, strip_formatting, CEDULA_DIGITS, TELEFONO_DIGITS,
};
use crate::validation::{normalize_whitespace, Field, FieldErrors};

/// One input event: which field changed and the raw text the user produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: Field,
    pub raw_value: String,
}

impl FieldChange {
    pub fn new(field: Field, raw_value: impl Into<String>) -> Self {
        Self {
            field,
            raw_value: raw_value.into(),
        }
    }
}

/// An uncommitted record plus its pending validation messages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub member: Member,
    pub errors: FieldErrors,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a copy of a committed record. The draft never aliases it.
    pub fn from_member(member: &Member) -> Self {
        Self {
            member: member.clone(),
            errors: FieldErrors::new(),
        }
    }

    /// Apply a keystroke: format the value for its field, store it, and clear
    /// that field's pending error.
    pub fn apply(&mut self, change: FieldChange) {
        let FieldChange { field, raw_value } = change;
        let member = &mut self.member;
        match field {
            Field::Nombre => member.nombre = raw_value,
            Field::Apellido => member.apellido = raw_value,
            Field::Cedula => member.cedula = format_cedula(&raw_value),
            Field::Telefono => member.telefono = format_telefono(&raw_value),
            Field::Email => member.email = raw_value,
            Field::Direccion => member.direccion = raw_value,
            Field::Sector => member.sector = raw_value,
            Field::ComiteId => member.comite_id = raw_value.trim().parse().unwrap_or(0),
        }
        self.errors.remove(&field);
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Copy of `member` ready for transmission: raw digits for cédula and
/// teléfono, whitespace-normalized text fields.
pub fn normalized_for_submit(member: &Member) -> Member {
    Member {
        nombre: normalize_whitespace(&member.nombre),
        apellido: normalize_whitespace(&member.apellido),
        cedula: strip_formatting(&member.cedula),
        telefono: strip_formatting(&member.telefono),
        email: member.email.trim().to_string(),
        direccion: normalize_whitespace(&member.direccion),
        sector: normalize_whitespace(&member.sector),
        ..member.clone()
    }
}

/// Copy of a stored record formatted for display/editing. Values with more
/// digits than the formatter keeps are left as stored.
pub fn formatted_for_display(member: &Member) -> Member {
    Member {
        cedula: format_within_cap(&member.cedula, CEDULA_DIGITS, format_cedula),
        telefono: format_within_cap(&member.telefono, TELEFONO_DIGITS, format_telefono),
        ..member.clone()
    }
}

fn format_within_cap(value: &str, cap: usize, format: fn(&str) -> String) -> String {
    if strip_formatting(value).len() > cap {
        value.to_string()
    } else {
        format(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_formats_cedula_and_telefono() {
        let mut draft = Draft::new();
        draft.apply(FieldChange::new(Field::Cedula, "00112345678"));
        draft.apply(FieldChange::new(Field::Telefono, "8095551234"));
        assert_eq!(draft.member.cedula, "001-1234567-8");
        assert_eq!(draft.member.telefono, "(809) 555-1234");
    }

    #[test]
    fn test_apply_parses_committee_selection() {
        let mut draft = Draft::new();
        draft.apply(FieldChange::new(Field::ComiteId, "4"));
        assert_eq!(draft.member.comite_id, 4);
        draft.apply(FieldChange::new(Field::ComiteId, "ninguno"));
        assert_eq!(draft.member.comite_id, 0);
    }

    #[test]
    fn test_apply_clears_only_that_fields_error() {
        let mut draft = Draft::new();
        draft.errors.insert(Field::Sector, "Sector es obligatorio".into());
        draft.errors.insert(Field::Email, "Ingrese un email válido".into());

        draft.apply(FieldChange::new(Field::Sector, "Los Mina"));

        assert_eq!(draft.error(Field::Sector), None);
        assert!(draft.error(Field::Email).is_some());
    }

    #[test]
    fn test_display_keeps_values_longer_than_the_format() {
        let stored = Member {
            cedula: "00112345678".into(),
            telefono: "18095551234".into(),
            ..Default::default()
        };

        let shown = formatted_for_display(&stored);

        assert_eq!(shown.cedula, "001-1234567-8");
        assert_eq!(shown.telefono, "18095551234");
        assert_eq!(normalized_for_submit(&shown).telefono, stored.telefono);
    }

    #[test]
    fn test_draft_does_not_alias_committed_record() {
        let committed = Member {
            email: "old@example.com".into(),
            ..Default::default()
        };
        let mut draft = Draft::from_member(&committed);
        draft.apply(FieldChange::new(Field::Email, "new@example.com"));
        assert_eq!(committed.email, "old@example.com");
    }

    #[test]
    fn test_normalized_for_submit() {
        let member = Member {
            nombre: "  Ana  María ".into(),
            cedula: "001-1234567-8".into(),
            telefono: "(809) 555-1234".into(),
            email: " ana@example.com ".into(),
            ..Default::default()
        };
        let normalized = normalized_for_submit(&member);
        assert_eq!(normalized.nombre, "Ana María");
        assert_eq!(normalized.cedula, "00112345678");
        assert_eq!(normalized.telefono, "8095551234");
        assert_eq!(normalized.email, "ana@example.com");
    }
}
