//! The record table and the pieces it is assembled from.
//!
//! Rows are schemaless JSON objects ([`row::Row`]). The caller owns rows, columns, the selection
//! and the paging state, and passes them in as [`props::TableProps`];
//! [`view::RecordTable`] renders them and turns input into requests.

pub mod bindings;
pub mod column;
pub mod header;
pub mod identity;
pub mod layout;
pub mod memo;
pub mod pagination;
pub mod props;
pub mod row;
pub mod row_view;
pub mod selection;
pub mod view;
