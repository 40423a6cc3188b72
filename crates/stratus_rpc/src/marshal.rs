//! Marshaling runtime inputs into wire values.
//!
//! Marshaling turns an [`Input`] tree into [`PropertyValue`]s while
//! collecting the resources the tree depends on. Awaiting outputs is the
//! only suspension point; everything else is a synchronous recursive
//! transformation over the union.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use futures::future::BoxFuture;
use stratus_core::asset::{Archive, Asset, AssetOrArchive};
use stratus_core::deps::expand_dependencies;
use stratus_core::resource::ResourceRef;
use stratus_core::urn::Urn;
use stratus_core::value::Input;

use crate::error::MarshalError;
use crate::property::{
    ArchiveValue, AssetValue, OutputValue, PropertyMap, PropertyValue, ResourceReferenceValue,
};

/// Options controlling input marshaling.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarshalOptions {
    /// Fail if any output is encountered instead of awaiting it. Used when
    /// composing inputs for remote components, where implicitly awaiting
    /// would be unsound.
    pub error_on_output: bool,

    /// Exclude resource references from the collected dependency set. Used
    /// for the same remote-component case, keeping per-property dependency
    /// lists separate from whole-value resource references.
    pub exclude_resource_refs_from_deps: bool,
}

/// Result of marshaling a full input record or map.
#[derive(Debug, Default)]
pub struct MarshaledInputs {
    /// The wire property map. Properties whose value marshaled to null and
    /// that discovered no dependencies are omitted.
    pub properties: PropertyMap,
    /// URNs each retained property depends on, sorted per property.
    pub property_dependencies: HashMap<String, Vec<Urn>>,
    /// Union of all per-property dependency URNs, sorted and deduplicated.
    pub dependencies: Vec<Urn>,
}

/// Marshals a top-level input record or map.
///
/// The input must be a [`Input::Record`], [`Input::Map`], or
/// [`Input::Null`] (which marshals to an empty result).
///
/// # Errors
///
/// Fails on unsupported top-level shapes and on any per-property marshaling
/// failure, wrapped with the property name.
pub async fn marshal_inputs(
    props: &Input,
    opts: &MarshalOptions,
) -> Result<MarshaledInputs, MarshalError> {
    let mut result = MarshaledInputs::default();

    let fields: Vec<(String, &Input)> = match props {
        Input::Null => return Ok(result),
        Input::Record(fields) => fields
            .iter()
            .map(|field| (field.key.to_string(), &field.value))
            .collect(),
        Input::Map(map) => map.iter().map(|(key, value)| (key.clone(), value)).collect(),
        other => return Err(MarshalError::UnsupportedShape(other.kind())),
    };

    let mut all_deps = BTreeSet::new();
    for (name, value) in fields {
        let (wire, resources) = marshal_input(value, opts)
            .await
            .map_err(|err| MarshalError::property(name.clone(), err))?;

        let expanded = expand_dependencies(&resources, None).await?;
        let urns: Vec<Urn> = expanded.into_keys().collect();
        all_deps.extend(urns.iter().cloned());

        if !wire.is_null() || !urns.is_empty() {
            result.properties.insert(name.clone(), wire);
            result.property_dependencies.insert(name, urns);
        }
    }

    result.dependencies = all_deps.into_iter().collect();
    Ok(result)
}

/// Marshals one input value, returning the wire value and the resource
/// handles discovered while marshaling it.
pub fn marshal_input<'a>(
    value: &'a Input,
    opts: &'a MarshalOptions,
) -> BoxFuture<'a, Result<(PropertyValue, Vec<ResourceRef>), MarshalError>> {
    Box::pin(async move {
        match value {
            Input::Null => Ok((PropertyValue::Null, Vec::new())),
            Input::Bool(b) => Ok((PropertyValue::Bool(*b), Vec::new())),
            Input::Number(n) => Ok((PropertyValue::Number(*n), Vec::new())),
            Input::String(s) => Ok((PropertyValue::String(s.clone()), Vec::new())),

            Input::Array(items) => {
                let mut wire = Vec::with_capacity(items.len());
                let mut deps = Vec::new();
                for item in items {
                    let (item_wire, item_deps) = marshal_input(item, opts).await?;
                    wire.push(item_wire);
                    deps.extend(item_deps);
                }
                Ok((PropertyValue::Array(wire), deps))
            }

            Input::Map(map) => {
                let mut wire = PropertyMap::new();
                let mut deps = Vec::new();
                for (key, entry) in map {
                    let (entry_wire, entry_deps) = marshal_input(entry, opts).await?;
                    if !entry_wire.is_null() {
                        wire.insert(key.clone(), entry_wire);
                    }
                    deps.extend(entry_deps);
                }
                Ok((PropertyValue::Object(wire), deps))
            }

            Input::Record(fields) => {
                let mut wire = PropertyMap::new();
                let mut deps = Vec::new();
                for field in fields {
                    let (field_wire, field_deps) = marshal_input(&field.value, opts).await?;
                    if !field_wire.is_null() {
                        wire.insert(field.key.to_string(), field_wire);
                    }
                    deps.extend(field_deps);
                }
                Ok((PropertyValue::Object(wire), deps))
            }

            Input::Asset(asset) => {
                if asset.is_invalid() {
                    return Err(MarshalError::InvalidAsset);
                }
                Ok((PropertyValue::Asset(asset_value(asset)), Vec::new()))
            }

            Input::Archive(archive) => {
                if archive.is_invalid() {
                    return Err(MarshalError::InvalidArchive);
                }
                Ok((
                    PropertyValue::Archive(archive_value(archive, opts).await?),
                    Vec::new(),
                ))
            }

            Input::Resource(resource) => {
                let mut deps = Vec::new();
                if !opts.exclude_resource_refs_from_deps {
                    deps.push(Arc::clone(resource));
                }

                let urn_state = resource.urn().wait().await?;
                assert!(urn_state.known, "resource URN must be known when marshaled");
                assert!(!urn_state.secret, "resource URN must not be secret");
                let urn = urn_state.value.expect("known output carries a value");

                let id = match resource.id() {
                    Some(id_output) => {
                        let id_state = id_output.wait().await?;
                        assert!(
                            id_state.known,
                            "custom resource ID must be known when marshaled"
                        );
                        assert!(!id_state.secret, "custom resource ID must not be secret");
                        let id = id_state.value.expect("known output carries a value");
                        Some(id.as_str().to_string())
                    }
                    None => None,
                };

                Ok((
                    PropertyValue::ResourceReference(ResourceReferenceValue::new(urn, id)),
                    deps,
                ))
            }

            Input::Output(output) => {
                if opts.error_on_output {
                    return Err(MarshalError::OutputNotAllowed);
                }

                let state = output.wait().await?;

                let mut element = PropertyValue::Null;
                if state.known {
                    let value = state.value.as_ref().expect("known output carries a value");
                    let (wire, _inner_deps) = marshal_input(value, opts).await?;
                    element = wire;

                    // Known, non-secret, dependency-free values inline
                    // directly, avoiding an unnecessary wrapper.
                    if !state.secret && state.deps.is_empty() {
                        return Ok((element, Vec::new()));
                    }
                }

                let expanded = expand_dependencies(&state.deps, None).await?;
                let dependencies: Vec<Urn> = expanded.into_keys().collect();

                Ok((
                    PropertyValue::Output(OutputValue {
                        element: Box::new(element),
                        known: state.known,
                        secret: state.secret,
                        dependencies,
                    }),
                    state.deps,
                ))
            }
        }
    })
}

fn asset_value(asset: &Asset) -> AssetValue {
    AssetValue {
        path: asset.path().map(str::to_string),
        text: asset.text().map(str::to_string),
        uri: asset.remote().map(str::to_string),
    }
}

async fn archive_value(
    archive: &Archive,
    opts: &MarshalOptions,
) -> Result<ArchiveValue, MarshalError> {
    let mut wire = ArchiveValue {
        path: archive.path().map(str::to_string),
        uri: archive.remote().map(str::to_string),
        assets: None,
    };

    if let Some(entries) = archive.assets() {
        let mut assets = std::collections::BTreeMap::new();
        for (name, entry) in entries {
            let input = match entry {
                AssetOrArchive::Asset(asset) => Input::Asset(asset.clone()),
                AssetOrArchive::Archive(archive) => Input::Archive(archive.clone()),
            };
            let (entry_wire, _deps) = marshal_input(&input, opts).await?;
            assets.insert(name.clone(), entry_wire);
        }
        wire.assets = Some(assets);
    }

    Ok(wire)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratus_core::output::Output;
    use stratus_core::value::{InputField, ToInput};

    #[tokio::test]
    async fn scalars_marshal_directly() {
        let opts = MarshalOptions::default();
        let (wire, deps) = marshal_input(&Input::Bool(true), &opts).await.unwrap();
        assert_eq!(wire, PropertyValue::Bool(true));
        assert!(deps.is_empty());

        let (wire, _) = marshal_input(&3_i64.to_input(), &opts).await.unwrap();
        assert_eq!(wire, PropertyValue::Number(3.0));
    }

    #[tokio::test]
    async fn known_plain_outputs_inline() {
        let opts = MarshalOptions::default();
        let input = Input::Output(Output::resolved(Input::String("inline".to_string())));
        let (wire, deps) = marshal_input(&input, &opts).await.unwrap();
        assert_eq!(wire, PropertyValue::String("inline".to_string()));
        assert!(deps.is_empty());
    }

    #[tokio::test]
    async fn secret_outputs_wrap() {
        let opts = MarshalOptions::default();
        let input = Input::Output(Output::secret(Input::String("shh".to_string())));
        let (wire, _) = marshal_input(&input, &opts).await.unwrap();
        let PropertyValue::Output(output) = wire else {
            panic!("expected output wrapper");
        };
        assert!(output.known);
        assert!(output.secret);
        assert_eq!(*output.element, PropertyValue::String("shh".to_string()));
    }

    #[tokio::test]
    async fn unknown_outputs_wrap_without_an_element() {
        let opts = MarshalOptions::default();
        let input = Input::Output(Output::<Input>::unknown());
        let (wire, _) = marshal_input(&input, &opts).await.unwrap();
        let PropertyValue::Output(output) = wire else {
            panic!("expected output wrapper");
        };
        assert!(!output.known);
        assert!(output.element.is_null());
    }

    #[tokio::test]
    async fn error_on_output_rejects_outputs() {
        let opts = MarshalOptions {
            error_on_output: true,
            ..MarshalOptions::default()
        };
        let input = Input::Output(Output::resolved(Input::Null));
        let err = marshal_input(&input, &opts).await.err().unwrap();
        assert!(matches!(err, MarshalError::OutputNotAllowed));
    }

    #[tokio::test]
    async fn invalid_wrappers_fail() {
        let opts = MarshalOptions::default();
        let err = marshal_input(&Input::Asset(Asset::invalid()), &opts)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, MarshalError::InvalidAsset));

        let err = marshal_input(&Input::Archive(Archive::invalid()), &opts)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, MarshalError::InvalidArchive));
    }

    #[tokio::test]
    async fn maps_encode_sparsely() {
        let opts = MarshalOptions::default();
        let mut map = stratus_core::value::InputMap::new();
        map.insert("present".to_string(), Input::Number(1.0));
        map.insert("absent".to_string(), Input::Null);

        let (wire, _) = marshal_input(&Input::Map(map), &opts).await.unwrap();
        let PropertyValue::Object(object) = wire else {
            panic!("expected object");
        };
        assert!(object.contains_key("present"));
        assert!(!object.contains_key("absent"));
    }

    #[tokio::test]
    async fn top_level_must_be_record_or_map() {
        let opts = MarshalOptions::default();
        let err = marshal_inputs(&Input::Number(3.0), &opts).await.unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedShape("number")));
    }

    #[tokio::test]
    async fn property_errors_carry_the_property_name() {
        let opts = MarshalOptions::default();
        let record = Input::Record(vec![InputField {
            key: "content",
            value: Input::Asset(Asset::invalid()),
        }]);
        let err = marshal_inputs(&record, &opts).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "awaiting input property 'content': invalid asset"
        );
    }

    #[tokio::test]
    async fn archives_marshal_nested_assets() {
        let opts = MarshalOptions::default();
        let mut entries = std::collections::BTreeMap::new();
        entries.insert(
            "readme".to_string(),
            AssetOrArchive::Asset(Asset::from_text("docs")),
        );
        let input = Input::Archive(Archive::from_assets(entries));

        let (wire, _) = marshal_input(&input, &opts).await.unwrap();
        let PropertyValue::Archive(archive) = wire else {
            panic!("expected archive");
        };
        let assets = archive.assets.unwrap();
        let PropertyValue::Asset(readme) = &assets["readme"] else {
            panic!("expected asset entry");
        };
        assert_eq!(readme.text.as_deref(), Some("docs"));
    }
}
