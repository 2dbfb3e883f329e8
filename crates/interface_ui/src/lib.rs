//! UI Collaborator Layer
//!
//! This crate is what the loan pages call into. It owns no page state:
//! handlers read field contents and answer with render instructions.
//!
//! # Architecture
//!
//! - **Handlers**: amount inputs, loan calculator, collection modal, list search
//! - **Render**: instructions the host applies to the page
//! - **Gateway**: the collection endpoint, behind an async port
//! - **DTOs**: wire types of the collection endpoint
//!
//! # Example
//!
//! ```rust
//! use interface_ui::handlers::calculator::{on_calculator_input, CalculatorInput};
//! use interface_ui::render::{elements, RenderInstruction};
//!
//! let input = CalculatorInput {
//!     principal: "100.000".to_string(),
//!     rate: "10".to_string(),
//!     installments: "12".to_string(),
//!     credit_limit: None,
//! };
//! let ins = on_calculator_input(&input);
//! assert_eq!(ins[0], RenderInstruction::set_text(elements::TOTAL_PAYABLE, "$110.000"));
//! ```

pub mod config;
pub mod error;
pub mod dto;
pub mod gateway;
pub mod handlers;
pub mod render;

pub use config::UiConfig;
pub use error::{FormError, UiError};
pub use gateway::{build_collection_request, CollectionGateway, TowerCollectionGateway};
pub use handlers::collection::{CollectionController, PartialPaymentForm};
pub use render::{RenderInstruction, ToastKind};
