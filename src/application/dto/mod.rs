//! # Data Transfer Objects
//!
//! DTOs for use case input/output, decoupling callers from the domain.
//!
//! These objects provide a clean interface between transport layers and
//! the application layer, handling validation and serialization.

pub mod quote_dto;

pub use quote_dto::{
    ConvertQuoteRequest, ConvertQuoteResponse, ProjectLot, ProjectPayload, QuoteUpdate,
    TransitionQuoteRequest, TransitionQuoteResponse, TypeMarginUpdate, UpdateQuoteRequest,
    UpdateQuoteResponse,
};
