//! Field validation for registration and profile forms.
//!
//! Pure functions only: a field and its raw value go in, an optional
//! user-facing message comes out. [`validate_form`] never stops at the first
//! failure, so the form can highlight every invalid field at once.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

use comite_api::Member;

use crate::format::{strip_formatting, CEDULA_DIGITS, TELEFONO_DIGITS};

lazy_static! {
    static ref LETTERS_AND_SPACES: Regex = Regex::new(r"^[\p{L} ]+$").unwrap();
    static ref PHONE_CHARS: Regex = Regex::new(r"^[0-9()+.\- ]+$").unwrap();
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// User-editable member fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Nombre,
    Apellido,
    Cedula,
    Telefono,
    Email,
    Direccion,
    Sector,
    ComiteId,
}

/// Violations keyed by field, in form order.
pub type FieldErrors = BTreeMap<Field, String>;

impl Field {
    /// Every field checked by [`validate_form`]. System fields (id,
    /// fecha_ingreso, activo, rol_id) are never user input.
    pub const FORM_FIELDS: [Field; 8] = [
        Field::Nombre,
        Field::Apellido,
        Field::Cedula,
        Field::Telefono,
        Field::Email,
        Field::Direccion,
        Field::Sector,
        Field::ComiteId,
    ];

    /// Wire/form name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Nombre => "nombre",
            Field::Apellido => "apellido",
            Field::Cedula => "cedula",
            Field::Telefono => "telefono",
            Field::Email => "email",
            Field::Direccion => "direccion",
            Field::Sector => "sector",
            Field::ComiteId => "comite_id",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Nombre => "Nombre",
            Field::Apellido => "Apellido",
            Field::Cedula => "Cédula",
            Field::Telefono => "Teléfono",
            Field::Email => "Email",
            Field::Direccion => "Dirección",
            Field::Sector => "Sector",
            Field::ComiteId => "Comité",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::FORM_FIELDS
            .into_iter()
            .find(|field| field.name() == name)
    }

    /// Current value of this field on a record, as form text.
    pub fn value_of(&self, member: &Member) -> String {
        match self {
            Field::Nombre => member.nombre.clone(),
            Field::Apellido => member.apellido.clone(),
            Field::Cedula => member.cedula.clone(),
            Field::Telefono => member.telefono.clone(),
            Field::Email => member.email.clone(),
            Field::Direccion => member.direccion.clone(),
            Field::Sector => member.sector.clone(),
            Field::ComiteId => member.comite_id.to_string(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trim and collapse internal whitespace runs to a single space.
pub fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check one field. `None` means the value is acceptable.
pub fn validate_field(field: Field, value: &str) -> Option<String> {
    let value = normalize_whitespace(value);
    let label = field.label();

    if value.is_empty() {
        return Some(match field {
            Field::ComiteId => "Seleccione un comité".to_string(),
            _ => format!("{} es obligatorio", label),
        });
    }

    match field {
        Field::Nombre | Field::Apellido => {
            if value.chars().count() < 2 {
                Some(format!("{} debe tener al menos 2 caracteres", label))
            } else if !LETTERS_AND_SPACES.is_match(&value) {
                Some(format!("{} solo puede contener letras y espacios", label))
            } else {
                None
            }
        }
        Field::Cedula => {
            if strip_formatting(&value).len() != CEDULA_DIGITS {
                Some(format!("{} debe tener {} dígitos", label, CEDULA_DIGITS))
            } else {
                None
            }
        }
        Field::Telefono => {
            if !PHONE_CHARS.is_match(&value) {
                Some(format!("{} solo puede contener números", label))
            } else if strip_formatting(&value).len() < TELEFONO_DIGITS {
                Some(format!("{} debe tener al menos {} dígitos", label, TELEFONO_DIGITS))
            } else {
                None
            }
        }
        Field::Email => {
            if !EMAIL.is_match(&value) {
                Some("Ingrese un email válido".to_string())
            } else {
                None
            }
        }
        Field::Sector => {
            if value.chars().count() < 2 {
                Some(format!("{} debe tener al menos 2 caracteres", label))
            } else {
                None
            }
        }
        Field::Direccion => {
            if value.chars().count() < 5 {
                Some(format!("{} debe tener al menos 5 caracteres", label))
            } else {
                None
            }
        }
        Field::ComiteId => match value.parse::<i64>() {
            Ok(id) if id != 0 => None,
            _ => Some("Seleccione un comité".to_string()),
        },
    }
}

/// Check every user-editable field of a record and collect all violations.
///
/// Returns an empty map iff the record is submittable.
pub fn validate_form(member: &Member) -> FieldErrors {
    Field::FORM_FIELDS
        .into_iter()
        .filter_map(|field| validate_field(field, &field.value_of(member)).map(|msg| (field, msg)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_member() -> Member {
        Member {
            nombre: "José".into(),
            apellido: "Núñez de la Cruz".into(),
            cedula: "001-1234567-8".into(),
            telefono: "(809) 555-1234".into(),
            email: "jose@example.com".into(),
            direccion: "Calle 5 #12".into(),
            sector: "Villa Duarte".into(),
            comite_id: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_member_has_no_errors() {
        assert!(validate_form(&valid_member()).is_empty());
    }

    #[test]
    fn test_names_accept_accents_and_reject_digits() {
        assert_eq!(validate_field(Field::Nombre, "  María   José "), None);
        assert_eq!(validate_field(Field::Apellido, "Peña"), None);
        assert!(validate_field(Field::Nombre, "J").is_some());
        assert!(validate_field(Field::Nombre, "Ana2").is_some());
        assert!(validate_field(Field::Apellido, "   ").is_some());
    }

    #[test]
    fn test_cedula_requires_eleven_digits() {
        assert_eq!(validate_field(Field::Cedula, "001-1234567-8"), None);
        assert_eq!(validate_field(Field::Cedula, "00112345678"), None);
        assert!(validate_field(Field::Cedula, "001-1234567").is_some());
        assert!(validate_field(Field::Cedula, "001123456789").is_some());
        assert!(validate_field(Field::Cedula, "").is_some());
    }

    #[test]
    fn test_telefono_rules() {
        assert_eq!(validate_field(Field::Telefono, "(809) 555-1234"), None);
        assert_eq!(validate_field(Field::Telefono, "+1 809 555 1234"), None);
        assert!(validate_field(Field::Telefono, "809555123").is_some());
        assert!(validate_field(Field::Telefono, "809-555-12ab").is_some());
    }

    #[test]
    fn test_email_shape() {
        assert_eq!(validate_field(Field::Email, "ana@comite.org.do"), None);
        assert!(validate_field(Field::Email, "ana@comite").is_some());
        assert!(validate_field(Field::Email, "ana comite@x.do").is_some());
        assert!(validate_field(Field::Email, "@x.do").is_some());
    }

    #[test]
    fn test_sector_and_direccion_lengths() {
        assert!(validate_field(Field::Sector, "").is_some());
        assert!(validate_field(Field::Sector, "A").is_some());
        assert_eq!(validate_field(Field::Sector, "Ensanche"), None);
        assert!(validate_field(Field::Direccion, "C/ 5").is_some());
        assert_eq!(validate_field(Field::Direccion, "Calle 5"), None);
    }

    #[test]
    fn test_unset_committee_is_always_reported() {
        let mut member = valid_member();
        member.comite_id = 0;
        let errors = validate_form(&member);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&Field::ComiteId));

        let errors = validate_form(&Member::default());
        assert!(errors.contains_key(&Field::ComiteId));
    }

    #[test]
    fn test_form_collects_every_violation() {
        let errors = validate_form(&Member::default());
        assert_eq!(errors.len(), Field::FORM_FIELDS.len());
    }

    fn arb_member() -> impl Strategy<Value = Member> {
        (
            "[A-Za-zñé ]{0,6}|Ana2",
            "[A-Za-zñé ]{0,6}",
            "[0-9-]{0,14}",
            "[0-9() +.-]{0,14}|809x5551234",
            "[a-z]{0,3}@?[a-z]{0,3}\\.?[a-z]{0,2}",
            "[A-Za-z0-9 #]{0,8}",
            "[A-Za-z ]{0,4}",
            0i64..4,
        )
            .prop_map(
                |(nombre, apellido, cedula, telefono, email, direccion, sector, comite_id)| Member {
                    nombre,
                    apellido,
                    cedula,
                    telefono,
                    email,
                    direccion,
                    sector,
                    comite_id,
                    ..Default::default()
                },
            )
    }

    proptest! {
        #[test]
        fn prop_form_is_clean_iff_every_field_is(member in arb_member()) {
            let fields_clean = Field::FORM_FIELDS
                .iter()
                .all(|field| validate_field(*field, &field.value_of(&member)).is_none());
            prop_assert_eq!(validate_form(&member).is_empty(), fields_clean);
        }
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::FORM_FIELDS {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("rol_id"), None);
    }
}
