//! # Application Layer
//!
//! Use case orchestration and application services.
//!
//! This layer coordinates domain objects to perform business operations,
//! handling validation, persistence, journaling, and events.
//!
//! ## Use Cases
//!
//! - [`UpdateQuoteUseCase`]: Update a quote's pricing configuration
//! - [`TransitionQuoteUseCase`]: Apply a guarded workflow transition
//! - [`ConvertQuoteUseCase`]: Convert an accepted quote into a project

pub mod dto;
pub mod error;
pub mod use_cases;

pub use dto::{
    ConvertQuoteRequest, ConvertQuoteResponse, ProjectLot, ProjectPayload, QuoteUpdate,
    TransitionQuoteRequest, TransitionQuoteResponse, TypeMarginUpdate, UpdateQuoteRequest,
    UpdateQuoteResponse,
};
pub use error::{ApplicationError, ApplicationResult};
pub use use_cases::{
    ConvertQuoteUseCase, EventPublisher, TransitionQuoteUseCase, UpdateQuoteUseCase,
};
