//! Testing utilities for the IntAct curation workspace
//!
//! Shared fixtures and tracing setup.

#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use intact_model::{
    Annotation, Audit, CvTerm, EntityId, Experiment, Graph, LifecycleEvent, LifecycleEventKind,
    Publication, Role, User, Xref,
};

/// Install a test-writer subscriber once; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).unwrap()
}

pub fn create_xref(database: &str, id: &str) -> Xref {
    Xref::new(database, id).unwrap()
}

pub fn create_annotation(topic: &str, value: &str) -> Annotation {
    Annotation::new(topic).unwrap().with_value(value)
}

/// Event on day `day` of January 2024, by `curator1`
pub fn create_event(kind: LifecycleEventKind, day: u32) -> LifecycleEvent {
    LifecycleEvent::new(kind, ts(2024, 1, day)).by("curator1")
}

pub fn create_publication(short_label: &str) -> Publication {
    let mut publication = Publication::new(short_label).unwrap();
    publication.audit = Audit::created_by("curator1", ts(2024, 1, 1));
    publication
}

/// Publication that looks loaded from storage (carries an accession)
pub fn create_persisted_publication(short_label: &str, ac: &str) -> Publication {
    let mut publication = create_publication(short_label);
    publication.ac = Some(ac.to_owned());
    publication
}

pub fn create_experiment(short_label: &str, publication: Option<EntityId>) -> Experiment {
    let mut experiment = Experiment::new(short_label).unwrap();
    experiment.publication = publication;
    experiment
}

pub fn create_term(short_label: &str, identifier: &str) -> CvTerm {
    CvTerm::new(short_label).unwrap().with_identifier(identifier)
}

/// Insert one [`Role`] per name and a user holding them
pub fn create_user_with_roles(graph: &mut Graph, login: &str, roles: &[&str]) -> EntityId {
    let mut user = User::new(login).unwrap();
    user.roles = roles
        .iter()
        .map(|name| graph.insert(Role::new(*name).unwrap()))
        .collect();
    graph.insert(user)
}

/// Names of the roles held by `user`, in collection order
pub fn role_names(graph: &Graph, user: EntityId) -> Vec<String> {
    graph
        .record::<User>(user)
        .unwrap()
        .roles
        .iter()
        .map(|role| graph.record::<Role>(*role).unwrap().name().to_owned())
        .collect()
}
