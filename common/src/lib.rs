//! Home Online Common Library
//!
//! CLIと共有される型と導出ロジック（I/Oなし）

pub mod types;
pub mod error;
pub mod tracker;
pub mod activity;
pub mod checklist;
pub mod aggregator;
pub mod route;
pub mod notify;
pub mod application;
pub mod export;

pub use types::{
    ApplicationStatus, DocumentRequest, DocumentRequestStatus, DocumentRequirement, FileMeta,
    LenderApplication, LenderStatus, LoanOffer, Stage, UploadedFile,
};
pub use error::{Error, Result};
pub use tracker::{classify, derive_progress, Classification, CompletionCounts, Derivation};
pub use activity::{ActivityEntry, ActivityKind, ActivityLog};
pub use checklist::DocumentChecklist;
pub use aggregator::{AcceptedOffer, LenderSummary, OfferRow, OfferSortKey};
pub use route::Route;
pub use notify::{Notification, Notifier, Variant};
pub use application::{ApplicationType, StoredApplication, APPLICATION_KEY};
