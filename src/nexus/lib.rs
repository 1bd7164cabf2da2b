//! # Nexus Architecture
//!
//! Nexus is a **UI-agnostic media catalog**: a feed of video, audio and binary
//! items that users sign in to, open, comment on and upload to. The library owns the
//! catalog state and every rule about how it changes; whatever draws it on screen
//! (the bundled terminal client, a web front end, a test) only forwards intents and
//! renders projections.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints, owns the async runtime         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - NexusApi: owns AppState, the store, the insight tracker  │
//! │  - Read-only projections for rendering                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)    Projection (projection.rs)│
//! │  - Total state transitions        - Feed/channel/search     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collaborators                                              │
//! │  - store/: DataStore trait, FileStore, InMemoryStore        │
//! │  - insight/: InsightFetcher trait, Gemini adapter           │
//! │  - media.rs: local file → MediaItem                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! After every operation:
//! - item ids are unique, and the catalog is newest-first
//! - a view count only grows, by one per selection of that item
//! - comment lists only grow at the front
//! - the selection, if any, names an item in the catalog
//! - nobody signed in means feed view and no selection
//!
//! ## Failure Model
//!
//! Invalid intents are ignored, never errors. Storage writes are best-effort: a
//! failed write is logged and reported in the command result, and the transition
//! stands. A failed insight request shows [`insight::FALLBACK_INSIGHT`].
//!
//! ## Module Overview
//!
//! - [`api`]: the catalog store facade, entry point for all operations
//! - [`commands`]: transition logic per intent
//! - [`projection`]: the filtered feed and the related rail
//! - [`store`]: storage abstraction and implementations
//! - [`insight`]: generated item descriptions and staleness tracking
//! - [`model`]: core data types (`User`, `MediaItem`, `Comment`, `AppState`)
//! - [`media`]: building upload records from local files
//! - [`seed`]: the demo catalog
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod insight;
pub mod media;
pub mod model;
pub mod projection;
pub mod seed;
pub mod store;
