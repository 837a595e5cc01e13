//! Integration tests for self-registration.

use std::sync::Arc;
use std::time::Duration;

use comite_client::testing::{DirectoryCall, Endpoint, MockDirectory};
use comite_client::{
    Committee, Directories, Field, FieldChange, RegistrationForm, SubmitError,
};

fn committee(id: i64, nombre: &str) -> Committee {
    Committee {
        id,
        nombre: nombre.into(),
        activo: true,
        ..Default::default()
    }
}

fn seeded() -> Arc<MockDirectory> {
    Arc::new(
        MockDirectory::new()
            .with_committee(committee(3, "Los Mina Norte"))
            .with_committee(committee(4, "Villa Duarte"))
            .with_role(2, "Administrador")
            .with_role(5, "Miembro"),
    )
}

fn form(directory: &Arc<MockDirectory>) -> RegistrationForm {
    RegistrationForm::new(
        Directories::from_shared(directory.clone()),
        Duration::from_secs(3),
    )
}

fn fill_valid(form: &mut RegistrationForm) {
    for (field, value) in [
        (Field::Nombre, "Ana"),
        (Field::Apellido, "Pérez"),
        (Field::Cedula, "00112345678"),
        (Field::Telefono, "8095551234"),
        (Field::Email, "ana@example.com"),
        (Field::Direccion, "Calle 5 #12"),
        (Field::Sector, "Los Mina"),
        (Field::ComiteId, "3"),
    ] {
        form.apply(FieldChange::new(field, value));
    }
}

#[tokio::test]
async fn test_load_fetches_committees_and_default_role() {
    let directory = seeded();
    let mut form = form(&directory);

    form.load().await;

    assert_eq!(form.committees().len(), 2);
    assert_eq!(form.role_id(), 5);
    let calls = directory.calls();
    assert!(calls.contains(&DirectoryCall::ListCommittees));
    assert!(calls.contains(&DirectoryCall::ListRoles));
}

#[tokio::test]
async fn test_failed_role_list_falls_back_and_keeps_committees() {
    let directory = Arc::new(
        MockDirectory::new()
            .with_committee(committee(3, "Los Mina Norte"))
            .failing(Endpoint::Roles),
    );
    let mut form = form(&directory);

    form.load().await;

    assert_eq!(form.committees().len(), 1);
    assert_eq!(form.role_id(), 1);
}

#[tokio::test]
async fn test_failed_committee_list_leaves_no_options() {
    let directory = Arc::new(
        MockDirectory::new()
            .with_role(5, "miembro")
            .failing(Endpoint::Committees),
    );
    let mut form = form(&directory);

    form.load().await;

    assert!(form.committees().is_empty());
    assert_eq!(form.role_id(), 5);
}

#[tokio::test]
async fn test_keystrokes_are_formatted_in_the_draft() {
    let directory = seeded();
    let mut form = form(&directory);

    fill_valid(&mut form);

    let member = &form.draft().member;
    assert_eq!(member.cedula, "001-1234567-8");
    assert_eq!(member.telefono, "(809) 555-1234");
    assert_eq!(member.comite_id, 3);
}

#[tokio::test]
async fn test_successful_submit_sends_canonical_record_and_resets() {
    let directory = seeded();
    let mut form = form(&directory);
    form.load().await;
    fill_valid(&mut form);

    let saved = form.submit().await.unwrap();

    assert_eq!(saved.id, 100);
    assert_eq!(saved.cedula, "00112345678");
    assert_eq!(saved.telefono, "8095551234");
    assert_eq!(saved.rol_id, 5);
    assert!(saved.activo);

    let sent = directory
        .calls()
        .into_iter()
        .find_map(|call| match call {
            DirectoryCall::Create(member) => Some(member),
            _ => None,
        })
        .unwrap();
    assert_eq!(sent.id, 0);
    assert_eq!(sent.cedula, "00112345678");

    assert_eq!(form.draft().member.nombre, "");
    assert!(form.notification().is_visible());
    assert_eq!(directory.members().len(), 1);
}

#[tokio::test]
async fn test_empty_sector_is_rejected_without_a_call() {
    let directory = seeded();
    let mut form = form(&directory);
    fill_valid(&mut form);
    form.apply(FieldChange::new(Field::Sector, ""));

    let err = form.submit().await.unwrap_err();

    match err {
        SubmitError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[&Field::Sector], "Sector es obligatorio");
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(directory.call_count(), 0);
    assert!(form.draft().error(Field::Sector).is_some());
}

#[tokio::test]
async fn test_unselected_committee_is_always_an_error() {
    let directory = seeded();
    let mut form = form(&directory);
    fill_valid(&mut form);

    for raw in ["0", "", "ninguno"] {
        form.apply(FieldChange::new(Field::ComiteId, raw));
        let err = form.submit().await.unwrap_err();
        match err {
            SubmitError::Validation(errors) => assert!(errors.contains_key(&Field::ComiteId)),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
    assert_eq!(directory.call_count(), 0);
}

#[tokio::test]
async fn test_editing_a_field_clears_its_error() {
    let directory = seeded();
    let mut form = form(&directory);

    let _ = form.submit().await;
    assert!(form.draft().error(Field::Nombre).is_some());

    form.apply(FieldChange::new(Field::Nombre, "Ana"));
    assert!(form.draft().error(Field::Nombre).is_none());
    assert!(form.draft().error(Field::Apellido).is_some());
}

#[tokio::test]
async fn test_remote_failure_keeps_the_draft() {
    let directory = Arc::new(
        MockDirectory::new()
            .with_committee(committee(3, "Los Mina Norte"))
            .failing(Endpoint::CreateMember),
    );
    let mut form = form(&directory);
    fill_valid(&mut form);
    let before = form.draft().member.clone();

    let err = form.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Remote(_)));
    assert_eq!(form.draft().member, before);
    assert!(!form.notification().is_visible());

    directory.recover(Endpoint::CreateMember);
    assert!(form.submit().await.is_ok());
}
