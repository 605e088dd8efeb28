// SPDX-License-Identifier: PMPL-1.0-or-later

//! i18n-audit: translation catalog tooling for JSX front-ends.
//!
//! Catalogs live at `<locales>/<locale>/<namespace>.json`; the default
//! locale is the baseline every other locale is measured against.
//!
//! - **extract**: inventories hard-coded user-facing literals in sources
//!   and `index.html`.
//! - **lint**: the same heuristic as an authoring-time rule.
//! - **validate**: missing, extra and placeholder-drifted keys per locale.
//! - **sync**: fills missing keys from the baseline.
//! - **backfill**: machine-translates strings that were never translated.

pub mod backfill;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod extract;
pub mod lint;
pub mod report;
pub mod store;
pub mod sync;
pub mod types;
pub mod validate;
