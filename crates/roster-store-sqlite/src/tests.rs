//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use roster_core::{
  error::Error,
  person::NewPerson,
  store::{PersonFilter, PersonStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_person(name: &str, national_id: &str) -> NewPerson {
  NewPerson {
    full_name: name.to_string(),
    national_id: national_id.to_string(),
    birth_date: NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
    email: None,
    sex: None,
    birthplace: None,
    nationality: None,
  }
}

fn name_filter(name: &str) -> PersonFilter {
  PersonFilter { name: Some(name.to_string()), ..Default::default() }
}

fn digits_filter(digits: &str) -> PersonFilter {
  PersonFilter {
    national_id: Some(digits.to_string()),
    ..Default::default()
  }
}

// ─── Insert / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_id_and_stamps_both_timestamps() {
  let s = store().await;

  let person = s
    .insert(new_person("Ana Silva", "111.111.111-11"))
    .await
    .unwrap();

  assert!(person.id > 0);
  assert_eq!(person.registered_at, person.updated_at);
}

#[tokio::test]
async fn insert_then_get_roundtrip() {
  let s = store().await;

  let mut input = new_person("Ana Silva", "111.111.111-11");
  input.email = Some("ana@example.com".into());
  input.nationality = Some("brasileira".into());

  let created = s.insert(input).await.unwrap();
  let fetched = s.get(created.id).await.unwrap().unwrap();

  assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(99).await.unwrap().is_none());
}

// ─── Uniqueness ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_national_id_rejected() {
  let s = store().await;

  s.insert(new_person("Ana Silva", "11111111111"))
    .await
    .unwrap();
  let err = s
    .insert(new_person("Outra Ana", "11111111111"))
    .await
    .unwrap_err();

  assert!(matches!(err, Error::DuplicateNationalId));
}

#[tokio::test]
async fn duplicate_detected_across_formatting_variants() {
  let s = store().await;

  s.insert(new_person("Ana Silva", "111.111.111-11"))
    .await
    .unwrap();
  let err = s
    .insert(new_person("Outra Ana", "11111111111"))
    .await
    .unwrap_err();

  assert!(matches!(err, Error::DuplicateNationalId));
}

#[tokio::test]
async fn concurrent_inserts_with_same_key_admit_exactly_one() {
  let s = store().await;

  let (a, b) = tokio::join!(
    s.insert(new_person("Ana Silva", "111.111.111-11")),
    s.insert(new_person("Outra Ana", "11111111111")),
  );

  let winners = [&a, &b].iter().filter(|r| r.is_ok()).count();
  assert_eq!(winners, 1);

  let loser = if a.is_err() { a } else { b };
  assert!(matches!(loser.unwrap_err(), Error::DuplicateNationalId));
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_rewrites_fields_and_restamps_updated_at() {
  let s = store().await;

  let created = s
    .insert(new_person("Ana Silva", "111.111.111-11"))
    .await
    .unwrap();

  let mut replacement = new_person("Ana Souza", "111.111.111-11");
  replacement.email = Some("ana@example.com".into());
  let updated = s.update(created.id, replacement).await.unwrap();

  assert_eq!(updated.id, created.id);
  assert_eq!(updated.full_name, "Ana Souza");
  assert_eq!(updated.email.as_deref(), Some("ana@example.com"));
  assert_eq!(updated.registered_at, created.registered_at);
  assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn update_missing_returns_not_found() {
  let s = store().await;
  let err = s
    .update(42, new_person("Ana Silva", "11111111111"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound(42)));
}

#[tokio::test]
async fn update_to_another_records_national_id_conflicts() {
  let s = store().await;

  s.insert(new_person("Ana Silva", "11111111111"))
    .await
    .unwrap();
  let bruno = s
    .insert(new_person("Bruno Lima", "22222222222"))
    .await
    .unwrap();

  // Same digits as Ana's, different formatting.
  let err = s
    .update(bruno.id, new_person("Bruno Lima", "111.111.111-11"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateNationalId));
}

#[tokio::test]
async fn update_keeping_own_national_id_is_allowed() {
  let s = store().await;

  let created = s
    .insert(new_person("Ana Silva", "111.111.111-11"))
    .await
    .unwrap();
  let updated = s
    .update(created.id, new_person("Ana Souza", "111.111.111-11"))
    .await
    .unwrap();

  assert_eq!(updated.full_name, "Ana Souza");
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_then_get_returns_none() {
  let s = store().await;

  let created = s
    .insert(new_person("Ana Silva", "11111111111"))
    .await
    .unwrap();
  s.delete(created.id).await.unwrap();

  assert!(s.get(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_returns_not_found() {
  let s = store().await;
  let err = s.delete(7).await.unwrap_err();
  assert!(matches!(err, Error::NotFound(7)));
}

#[tokio::test]
async fn ids_are_never_reused() {
  let s = store().await;

  let first = s
    .insert(new_person("Ana Silva", "11111111111"))
    .await
    .unwrap();
  s.delete(first.id).await.unwrap();

  let second = s
    .insert(new_person("Bruno Lima", "22222222222"))
    .await
    .unwrap();
  assert!(second.id > first.id);
}

#[tokio::test]
async fn deleting_frees_the_national_id() {
  let s = store().await;

  let created = s
    .insert(new_person("Ana Silva", "11111111111"))
    .await
    .unwrap();
  s.delete(created.id).await.unwrap();

  // The key belongs to no live record now, so a fresh create may take it.
  assert!(s.insert(new_person("Outra Ana", "11111111111")).await.is_ok());
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_without_filters_returns_all_in_insertion_order() {
  let s = store().await;

  s.insert(new_person("Bruno Lima", "22222222222"))
    .await
    .unwrap();
  s.insert(new_person("Ana Silva", "11111111111"))
    .await
    .unwrap();

  let all = s.list(&PersonFilter::default()).await.unwrap();
  let names: Vec<&str> =
    all.iter().map(|p| p.full_name.as_str()).collect();
  assert_eq!(names, ["Bruno Lima", "Ana Silva"]);
}

#[tokio::test]
async fn list_filters_by_name_case_insensitively() {
  let s = store().await;

  s.insert(new_person("Ana Silva", "11111111111"))
    .await
    .unwrap();
  s.insert(new_person("Bruno Lima", "22222222222"))
    .await
    .unwrap();

  let hits = s.list(&name_filter("an")).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].full_name, "Ana Silva");
}

#[tokio::test]
async fn list_filters_by_digit_substring() {
  let s = store().await;

  s.insert(new_person("Ana Silva", "111.111.111-11"))
    .await
    .unwrap();
  s.insert(new_person("Bruno Lima", "222.222.222-22"))
    .await
    .unwrap();

  // Matches against the normalized digit string, not the stored formatting.
  let hits = s.list(&digits_filter("111")).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].full_name, "Ana Silva");
}

#[tokio::test]
async fn list_filters_combine() {
  let s = store().await;

  s.insert(new_person("Ana Silva", "11111111111"))
    .await
    .unwrap();
  s.insert(new_person("Ana Souza", "22222222222"))
    .await
    .unwrap();

  let filter = PersonFilter {
    name: Some("ana".into()),
    national_id: Some("222".into()),
  };
  let hits = s.list(&filter).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].full_name, "Ana Souza");
}
