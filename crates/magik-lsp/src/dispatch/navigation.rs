//! Hover, go-to and type hierarchy queries.

use super::{Pending, RequestDispatcher, neutral, spawn_instrumented};
use crate::convert::{location_to_lsp, position_from_lsp};
use magik_core::Location as MagikLocation;
use std::sync::Arc;
use tower_lsp_server::ls_types::{
    GotoDefinitionResponse, Hover, Location, Position, TypeHierarchyItem, Uri,
};

fn locations_to_lsp(locations: Vec<MagikLocation>) -> Vec<Location> {
    locations.into_iter().map(location_to_lsp).collect()
}

impl RequestDispatcher {
    /// `textDocument/hover`, answered for every document kind.
    pub fn hover(&self, uri: &Uri, position: Position) -> Pending<Option<Hover>> {
        const OPERATION: &str = "hover";

        let Some(document) = self.snapshot(uri) else {
            return neutral(OPERATION, uri, None);
        };
        let provider = Arc::clone(&self.providers.hover);
        let position = position_from_lsp(position);

        spawn_instrumented(OPERATION, uri, move || {
            provider.provide_hover(&document, position)
        })
    }

    /// `textDocument/implementation`, magik sources only.
    pub fn implementation(
        &self,
        uri: &Uri,
        position: Position,
    ) -> Pending<Option<GotoDefinitionResponse>> {
        const OPERATION: &str = "implementation";

        let Some(file) = self.snapshot(uri).and_then(|doc| doc.as_typed().cloned()) else {
            return neutral(OPERATION, uri, Some(GotoDefinitionResponse::Array(Vec::new())));
        };
        let provider = Arc::clone(&self.providers.implementation);
        let position = position_from_lsp(position);

        spawn_instrumented(OPERATION, uri, move || {
            let locations = provider.provide_implementations(&file, position);
            Some(GotoDefinitionResponse::Array(locations_to_lsp(locations)))
        })
    }

    /// `textDocument/definition`, answered for every document kind.
    pub fn definition(
        &self,
        uri: &Uri,
        position: Position,
    ) -> Pending<Option<GotoDefinitionResponse>> {
        const OPERATION: &str = "definition";

        let Some(document) = self.snapshot(uri) else {
            return neutral(OPERATION, uri, Some(GotoDefinitionResponse::Array(Vec::new())));
        };
        let provider = Arc::clone(&self.providers.definitions);
        let position = position_from_lsp(position);

        spawn_instrumented(OPERATION, uri, move || {
            let locations = provider.provide_definitions(&document, position);
            Some(GotoDefinitionResponse::Array(locations_to_lsp(locations)))
        })
    }

    /// `textDocument/references`, answered for every document kind.
    pub fn references(&self, uri: &Uri, position: Position) -> Pending<Option<Vec<Location>>> {
        const OPERATION: &str = "references";

        let Some(document) = self.snapshot(uri) else {
            return neutral(OPERATION, uri, Some(Vec::new()));
        };
        let provider = Arc::clone(&self.providers.references);
        let position = position_from_lsp(position);

        spawn_instrumented(OPERATION, uri, move || {
            let locations = provider.provide_references(&document, position);
            Some(locations_to_lsp(locations))
        })
    }

    /// `textDocument/prepareTypeHierarchy`, magik sources only.
    pub fn prepare_type_hierarchy(
        &self,
        uri: &Uri,
        position: Position,
    ) -> Pending<Option<Vec<TypeHierarchyItem>>> {
        const OPERATION: &str = "prepare_type_hierarchy";

        let Some(file) = self.snapshot(uri).and_then(|doc| doc.as_typed().cloned()) else {
            return neutral(OPERATION, uri, None);
        };
        let provider = Arc::clone(&self.providers.type_hierarchy);
        let position = position_from_lsp(position);

        spawn_instrumented(OPERATION, uri, move || {
            Some(provider.prepare_type_hierarchy(&file, position))
        })
    }

    /// `typeHierarchy/subtypes`. Items carry everything needed, so no
    /// document lookup happens.
    pub fn subtypes(&self, item: TypeHierarchyItem) -> Pending<Option<Vec<TypeHierarchyItem>>> {
        let provider = Arc::clone(&self.providers.type_hierarchy);
        let uri = item.uri.clone();

        spawn_instrumented("subtypes", &uri, move || {
            Some(provider.type_hierarchy_subtypes(&item))
        })
    }

    /// `typeHierarchy/supertypes`.
    pub fn supertypes(&self, item: TypeHierarchyItem) -> Pending<Option<Vec<TypeHierarchyItem>>> {
        let provider = Arc::clone(&self.providers.type_hierarchy);
        let uri = item.uri.clone();

        spawn_instrumented("supertypes", &uri, move || {
            Some(provider.type_hierarchy_supertypes(&item))
        })
    }
}
