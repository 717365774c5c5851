//! Shared builders for `FanHubConfig` layer tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::FanHubConfig;

/// Source a configuration layer comes from, lowest precedence first.
#[derive(Debug, Clone, Copy)]
pub enum Source {
    Defaults,
    File,
    Environment,
    Cli,
}

/// Merges `(source, value)` layers into a [`FanHubConfig`].
pub fn merge_layers(layers: &[(Source, Value)]) -> FanHubConfig {
    let mut composer = MergeComposer::new();

    for (source, value) in layers {
        let layer = value.clone();
        match source {
            Source::Defaults => composer.push_defaults(layer),
            Source::File => composer.push_file(layer, None),
            Source::Environment => composer.push_environment(layer),
            Source::Cli => composer.push_cli(layer),
        }
    }

    FanHubConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// Merges the layers and resolves the backend URL the checker would target.
pub fn resolved_base_url(layers: &[(Source, Value)]) -> String {
    merge_layers(layers).resolve_base_url()
}
