//! Unmarshaling wire values back into runtime values.
//!
//! Three surfaces, mirroring how engine responses are consumed:
//!
//! - [`unmarshal_value`] converts a wire value into a plain [`Input`],
//!   unwrapping output wrappers and reporting secrecy out-of-band.
//! - [`unmarshal_map`] converts a whole property map, keeping plain values
//!   plain and producing live [`Output`] handles for computed, secret, and
//!   output entries.
//! - [`unmarshal`] drives typed destinations through the [`FromProperty`]
//!   trait; record types go through an [`ObjectReader`] built from their
//!   field tables.
//!
//! Resource references resolve through the [`ResourceRegistry`]: a
//! registered constructor wins, and an unregistered reference degrades to a
//! dependency placeholder rather than failing.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use semver::Version;
use stratus_core::asset::{Archive, Asset, AssetOrArchive};
use stratus_core::output::Output;
use stratus_core::resource::{
    DependencyCustomResource, DependencyProviderResource, DependencyResource, ResourceId,
    ResourceRef,
};
use stratus_core::value::{Input, InputMap};

use crate::error::UnmarshalError;
use crate::property::{
    ArchiveValue, AssetValue, PropertyMap, PropertyValue, ResourceReferenceValue, is_internal_key,
};
use crate::registry::ResourceRegistry;

/// Shared context for unmarshaling.
#[derive(Clone, Copy)]
pub struct UnmarshalContext<'a> {
    registry: &'a ResourceRegistry,
}

impl<'a> UnmarshalContext<'a> {
    /// Creates a context resolving resource references against `registry`.
    #[must_use]
    pub fn new(registry: &'a ResourceRegistry) -> Self {
        Self { registry }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic unmarshaling
// ─────────────────────────────────────────────────────────────────────────────

/// Converts a wire value into a plain runtime value, returning the value
/// and whether anything in it was marked secret.
///
/// Output wrappers are unwrapped: an unknown output yields [`Input::Null`]
/// with the wrapper's secrecy. Use [`unmarshal_map`] to obtain live output
/// handles instead.
///
/// # Errors
///
/// Fails on malformed assets and archives and on resource references whose
/// registered constructor fails.
pub fn unmarshal_value(
    ctx: &UnmarshalContext<'_>,
    value: &PropertyValue,
) -> Result<(Input, bool), UnmarshalError> {
    match value {
        PropertyValue::Null | PropertyValue::Computed => Ok((Input::Null, false)),
        PropertyValue::Bool(b) => Ok((Input::Bool(*b), false)),
        PropertyValue::Number(n) => Ok((Input::Number(*n), false)),
        PropertyValue::String(s) => Ok((Input::String(s.clone()), false)),

        PropertyValue::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            let mut secret = false;
            for item in items {
                let (value, item_secret) = unmarshal_value(ctx, item)?;
                secret |= item_secret;
                values.push(value);
            }
            Ok((Input::Array(values), secret))
        }

        PropertyValue::Object(object) => {
            let mut map = InputMap::new();
            let mut secret = false;
            for (key, entry) in object {
                if is_internal_key(key) {
                    continue;
                }
                let (value, entry_secret) = unmarshal_value(ctx, entry)?;
                secret |= entry_secret;
                map.insert(key.clone(), value);
            }
            Ok((Input::Map(map), secret))
        }

        PropertyValue::Asset(asset) => Ok((Input::Asset(asset_from_wire(asset)?), false)),

        PropertyValue::Archive(archive) => {
            let (archive, secret) = archive_from_wire(ctx, archive)?;
            Ok((Input::Archive(archive), secret))
        }

        PropertyValue::Secret(inner) => {
            let (value, _) = unmarshal_value(ctx, inner)?;
            Ok((value, true))
        }

        PropertyValue::Output(output) => {
            if !output.known {
                return Ok((Input::Null, output.secret));
            }
            let (value, _) = unmarshal_value(ctx, &output.element)?;
            Ok((value, output.secret))
        }

        PropertyValue::ResourceReference(reference) => {
            let resource = unmarshal_resource_reference(ctx, reference)?;
            Ok((Input::Resource(resource), false))
        }
    }
}

/// Converts a wire property map into runtime values.
///
/// Plain values stay plain; computed, secret, and output entries become
/// live [`Output`] handles carrying the wire metadata, and resource
/// references become handles wrapped in already-known outputs. If an
/// unmarshaled output element is itself an output, the two collapse into
/// one level (AND known, OR secret, union dependencies) — outputs are never
/// nested.
///
/// # Errors
///
/// Fails on the same conditions as [`unmarshal_value`].
pub async fn unmarshal_map(
    ctx: &UnmarshalContext<'_>,
    map: &PropertyMap,
) -> Result<InputMap, UnmarshalError> {
    let mut result = InputMap::new();
    for (key, value) in map {
        if is_internal_key(key) {
            continue;
        }
        result.insert(key.clone(), unmarshal_entry(ctx, value).await?);
    }
    Ok(result)
}

fn unmarshal_entry<'a>(
    ctx: &'a UnmarshalContext<'a>,
    value: &'a PropertyValue,
) -> BoxFuture<'a, Result<Input, UnmarshalError>> {
    Box::pin(async move {
        match value {
            PropertyValue::Null => Ok(Input::Null),
            PropertyValue::Bool(b) => Ok(Input::Bool(*b)),
            PropertyValue::Number(n) => Ok(Input::Number(*n)),
            PropertyValue::String(s) => Ok(Input::String(s.clone())),

            PropertyValue::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(unmarshal_entry(ctx, item).await?);
                }
                Ok(Input::Array(values))
            }

            PropertyValue::Object(object) => {
                let nested = Box::pin(unmarshal_map(ctx, object)).await?;
                Ok(Input::Map(nested))
            }

            PropertyValue::Asset(asset) => Ok(Input::Asset(asset_from_wire(asset)?)),

            PropertyValue::Archive(archive) => {
                let (archive, _secret) = archive_from_wire(ctx, archive)?;
                Ok(Input::Archive(archive))
            }

            PropertyValue::ResourceReference(reference) => {
                // The reference becomes a dependency handle held by an
                // already-known resource output.
                let resource = unmarshal_resource_reference(ctx, reference)?;
                let (output, resolver) = Output::unresolved();
                resolver.fulfill(Some(Input::Resource(resource)), true, false, Vec::new());
                Ok(Input::Output(output))
            }

            PropertyValue::Computed => {
                let (output, resolver) = Output::unresolved();
                resolver.fulfill(None, false, false, Vec::new());
                Ok(Input::Output(output))
            }

            PropertyValue::Secret(inner) => {
                let element = unmarshal_entry(ctx, inner).await?;
                let output = match element {
                    Input::Output(inner) => inner.to_secret(),
                    element => {
                        let (output, resolver) = Output::unresolved();
                        resolver.fulfill(Some(element), true, true, Vec::new());
                        output
                    }
                };
                Ok(Input::Output(output))
            }

            PropertyValue::Output(wire) => {
                let mut deps: Vec<ResourceRef> = wire
                    .dependencies
                    .iter()
                    .map(|urn| Arc::new(DependencyResource::new(urn.clone())) as ResourceRef)
                    .collect();
                let mut known = wire.known;
                let mut secret = wire.secret;

                let mut element = None;
                if wire.known {
                    match unmarshal_entry(ctx, &wire.element).await? {
                        // Collapse one level rather than nesting futures.
                        Input::Output(inner) => {
                            let inner_state = inner.wait().await?;
                            known = known && inner_state.known;
                            secret = secret || inner_state.secret;
                            deps.extend(inner_state.deps);
                            element = inner_state.value;
                        }
                        value => element = Some(value),
                    }
                }

                let (output, resolver) = Output::unresolved();
                resolver.fulfill(element, known, secret, deps);
                Ok(Input::Output(output))
            }
        }
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Resource references
// ─────────────────────────────────────────────────────────────────────────────

/// Resolves a wire resource reference to a handle.
///
/// Resolution order: a registered provider package constructor (for
/// provider references), then a registered module constructor, then a
/// dependency placeholder — custom if the reference carries an ID,
/// component otherwise. Missing registrations never fail resolution.
///
/// # Errors
///
/// Fails on a malformed package version or when a registered constructor
/// itself fails.
pub fn unmarshal_resource_reference(
    ctx: &UnmarshalContext<'_>,
    reference: &ResourceReferenceValue,
) -> Result<ResourceRef, UnmarshalError> {
    let version = parse_reference_version(&reference.package_version)?;
    let urn = &reference.urn;
    let name = urn.name();
    let type_token = urn.type_token();

    if urn.is_provider() {
        let pkg = urn.type_name();
        if let Some(package) = ctx.registry.lookup_package(pkg, version.as_ref()) {
            return package
                .construct_provider(name, type_token, urn)
                .map_err(UnmarshalError::Construct);
        }
        tracing::debug!(
            package = pkg,
            "no provider constructor registered; using dependency placeholder"
        );
        let id = ResourceId::new(reference.id.clone().unwrap_or_default());
        return Ok(Arc::new(DependencyProviderResource::new(urn.clone(), id)));
    }

    if let Some(module) = ctx.registry.lookup_module(urn.module(), version.as_ref()) {
        return module
            .construct(name, type_token, urn)
            .map_err(UnmarshalError::Construct);
    }

    match &reference.id {
        Some(id) => Ok(Arc::new(DependencyCustomResource::new(
            urn.clone(),
            ResourceId::new(id.clone()),
        ))),
        None => Ok(Arc::new(DependencyResource::new(urn.clone()))),
    }
}

/// Parses a reference's package version; empty means wildcard.
///
/// The parse is tolerant: a leading `v` is dropped and missing minor/patch
/// segments are zero-padded before handing off to `semver`.
fn parse_reference_version(raw: &str) -> Result<Option<Version>, UnmarshalError> {
    if raw.is_empty() {
        return Ok(None);
    }

    let trimmed = raw.trim().trim_start_matches('v');
    let core_end = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, rest) = trimmed.split_at(core_end);
    let padded = match core.matches('.').count() {
        0 => format!("{core}.0.0{rest}"),
        1 => format!("{core}.0{rest}"),
        _ => trimmed.to_string(),
    };

    Version::parse(&padded)
        .map(Some)
        .map_err(|_| UnmarshalError::InvalidProviderVersion(raw.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Assets and archives
// ─────────────────────────────────────────────────────────────────────────────

fn asset_from_wire(asset: &AssetValue) -> Result<Asset, UnmarshalError> {
    if let Some(path) = &asset.path {
        Ok(Asset::from_file(path.clone()))
    } else if let Some(text) = &asset.text {
        Ok(Asset::from_text(text.clone()))
    } else if let Some(uri) = &asset.uri {
        Ok(Asset::from_remote(uri.clone()))
    } else {
        Err(UnmarshalError::MalformedAsset)
    }
}

fn archive_from_wire(
    ctx: &UnmarshalContext<'_>,
    archive: &ArchiveValue,
) -> Result<(Archive, bool), UnmarshalError> {
    if let Some(entries) = &archive.assets {
        let mut assets = BTreeMap::new();
        let mut secret = false;
        for (name, entry) in entries {
            let (value, entry_secret) = unmarshal_value(ctx, entry)?;
            secret |= entry_secret;
            let entry = match value {
                Input::Asset(asset) => AssetOrArchive::Asset(asset),
                Input::Archive(archive) => AssetOrArchive::Archive(archive),
                other => return Err(UnmarshalError::mismatch("asset or archive", other.kind())),
            };
            assets.insert(name.clone(), entry);
        }
        return Ok((Archive::from_assets(assets), secret));
    }
    if let Some(path) = &archive.path {
        return Ok((Archive::from_file(path.clone()), false));
    }
    if let Some(uri) = &archive.uri {
        return Ok((Archive::from_remote(uri.clone()), false));
    }
    Err(UnmarshalError::MalformedArchive)
}

// ─────────────────────────────────────────────────────────────────────────────
// Typed unmarshaling
// ─────────────────────────────────────────────────────────────────────────────

/// A value unmarshaled from a present wire value, with its secrecy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unmarshaled<T> {
    /// The converted value.
    pub value: T,
    /// Whether anything in the wire value was marked secret.
    pub secret: bool,
}

impl<T> Unmarshaled<T> {
    fn plain(value: T) -> Self {
        Self {
            value,
            secret: false,
        }
    }
}

/// Typed conversion from a present wire value.
///
/// Implementations see the wire value with Secret and Output wrappers
/// already peeled by [`unmarshal`]; a kind mismatch is a
/// [`UnmarshalError::TypeMismatch`].
pub trait FromProperty: Sized {
    /// Converts the wire value.
    ///
    /// # Errors
    ///
    /// Fails when the wire value is not convertible to `Self`.
    fn from_property(
        ctx: &UnmarshalContext<'_>,
        value: &PropertyValue,
    ) -> Result<Unmarshaled<Self>, UnmarshalError>;
}

/// Typed unmarshal driver.
///
/// Null, Computed, and unknown wire outputs produce `None`, leaving the
/// destination at its default; Secret and known Output wrappers are peeled
/// with their secrecy propagated; everything else dispatches to
/// [`FromProperty`].
///
/// # Errors
///
/// Fails when the present wire value is not convertible to `T`.
pub fn unmarshal<T: FromProperty>(
    ctx: &UnmarshalContext<'_>,
    value: &PropertyValue,
) -> Result<(Option<T>, bool), UnmarshalError> {
    match value {
        PropertyValue::Null | PropertyValue::Computed => Ok((None, false)),
        PropertyValue::Secret(inner) => {
            let (value, _) = unmarshal(ctx, inner)?;
            Ok((value, true))
        }
        PropertyValue::Output(output) if !output.known => Ok((None, output.secret)),
        PropertyValue::Output(output) => {
            let (value, _) = unmarshal(ctx, &output.element)?;
            Ok((value, output.secret))
        }
        present => {
            T::from_property(ctx, present).map(|unmarshaled| {
                (Some(unmarshaled.value), unmarshaled.secret)
            })
        }
    }
}

impl FromProperty for bool {
    fn from_property(
        _ctx: &UnmarshalContext<'_>,
        value: &PropertyValue,
    ) -> Result<Unmarshaled<Self>, UnmarshalError> {
        match value {
            PropertyValue::Bool(b) => Ok(Unmarshaled::plain(*b)),
            other => Err(UnmarshalError::mismatch("bool", other.type_label())),
        }
    }
}

macro_rules! impl_from_property_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromProperty for $ty {
                fn from_property(
                    _ctx: &UnmarshalContext<'_>,
                    value: &PropertyValue,
                ) -> Result<Unmarshaled<Self>, UnmarshalError> {
                    match value {
                        PropertyValue::Number(n) => Ok(Unmarshaled::plain(*n as $ty)),
                        other => Err(UnmarshalError::mismatch("number", other.type_label())),
                    }
                }
            }
        )*
    };
}

impl_from_property_number!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromProperty for String {
    fn from_property(
        _ctx: &UnmarshalContext<'_>,
        value: &PropertyValue,
    ) -> Result<Unmarshaled<Self>, UnmarshalError> {
        match value {
            PropertyValue::String(s) => Ok(Unmarshaled::plain(s.clone())),
            // A reference in string position reads as its ID when present,
            // else its URN.
            PropertyValue::ResourceReference(reference) => {
                let s = match &reference.id {
                    Some(id) => id.clone(),
                    None => reference.urn.as_str().to_string(),
                };
                Ok(Unmarshaled::plain(s))
            }
            other => Err(UnmarshalError::mismatch("string", other.type_label())),
        }
    }
}

impl<T: FromProperty + Default> FromProperty for Vec<T> {
    fn from_property(
        ctx: &UnmarshalContext<'_>,
        value: &PropertyValue,
    ) -> Result<Unmarshaled<Self>, UnmarshalError> {
        match value {
            PropertyValue::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                let mut secret = false;
                for item in items {
                    let (value, item_secret) = unmarshal(ctx, item)?;
                    secret |= item_secret;
                    values.push(value.unwrap_or_default());
                }
                Ok(Unmarshaled { value: values, secret })
            }
            other => Err(UnmarshalError::mismatch("array", other.type_label())),
        }
    }
}

impl<T: FromProperty + Default> FromProperty for std::collections::HashMap<String, T> {
    fn from_property(
        ctx: &UnmarshalContext<'_>,
        value: &PropertyValue,
    ) -> Result<Unmarshaled<Self>, UnmarshalError> {
        match value {
            PropertyValue::Object(object) => {
                let mut map = Self::new();
                let mut secret = false;
                for (key, entry) in object {
                    if is_internal_key(key) {
                        continue;
                    }
                    let (value, entry_secret) = unmarshal(ctx, entry)?;
                    secret |= entry_secret;
                    map.insert(key.clone(), value.unwrap_or_default());
                }
                Ok(Unmarshaled { value: map, secret })
            }
            other => Err(UnmarshalError::mismatch("object", other.type_label())),
        }
    }
}

impl FromProperty for Asset {
    fn from_property(
        _ctx: &UnmarshalContext<'_>,
        value: &PropertyValue,
    ) -> Result<Unmarshaled<Self>, UnmarshalError> {
        match value {
            PropertyValue::Asset(asset) => Ok(Unmarshaled::plain(asset_from_wire(asset)?)),
            other => Err(UnmarshalError::mismatch("asset", other.type_label())),
        }
    }
}

impl FromProperty for Archive {
    fn from_property(
        ctx: &UnmarshalContext<'_>,
        value: &PropertyValue,
    ) -> Result<Unmarshaled<Self>, UnmarshalError> {
        match value {
            PropertyValue::Archive(archive) => {
                let (archive, secret) = archive_from_wire(ctx, archive)?;
                Ok(Unmarshaled {
                    value: archive,
                    secret,
                })
            }
            other => Err(UnmarshalError::mismatch("archive", other.type_label())),
        }
    }
}

impl FromProperty for ResourceRef {
    fn from_property(
        ctx: &UnmarshalContext<'_>,
        value: &PropertyValue,
    ) -> Result<Unmarshaled<Self>, UnmarshalError> {
        match value {
            PropertyValue::ResourceReference(reference) => Ok(Unmarshaled::plain(
                unmarshal_resource_reference(ctx, reference)?,
            )),
            other => Err(UnmarshalError::mismatch(
                "resource reference",
                other.type_label(),
            )),
        }
    }
}

/// An "any" destination: converts like [`unmarshal_value`].
impl FromProperty for Input {
    fn from_property(
        ctx: &UnmarshalContext<'_>,
        value: &PropertyValue,
    ) -> Result<Unmarshaled<Self>, UnmarshalError> {
        let (value, secret) = unmarshal_value(ctx, value)?;
        Ok(Unmarshaled { value, secret })
    }
}

/// Keyed field extraction for record destinations.
///
/// Generated state types implement [`FromProperty`] by reading each wire
/// key off the object; missing and null entries fill with the field type's
/// default, and secrecy accumulates across every field read.
pub struct ObjectReader<'a, 'ctx> {
    ctx: &'a UnmarshalContext<'ctx>,
    object: &'a PropertyMap,
    secret: bool,
}

impl<'a, 'ctx> ObjectReader<'a, 'ctx> {
    /// Opens a reader over an object wire value.
    ///
    /// # Errors
    ///
    /// Fails with a kind mismatch if the value is not an object.
    pub fn new(
        ctx: &'a UnmarshalContext<'ctx>,
        value: &'a PropertyValue,
    ) -> Result<Self, UnmarshalError> {
        match value {
            PropertyValue::Object(object) => Ok(Self {
                ctx,
                object,
                secret: false,
            }),
            other => Err(UnmarshalError::mismatch("object", other.type_label())),
        }
    }

    /// Reads a field, filling missing or unset entries with the default.
    ///
    /// # Errors
    ///
    /// Fails when the entry is present but not convertible to `T`.
    pub fn field<T: FromProperty + Default>(&mut self, key: &str) -> Result<T, UnmarshalError> {
        match self.object.get(key) {
            None => Ok(T::default()),
            Some(entry) => {
                let (value, secret) = unmarshal(self.ctx, entry)?;
                self.secret |= secret;
                Ok(value.unwrap_or_default())
            }
        }
    }

    /// Reads an optional field; missing and unset entries yield `None`.
    ///
    /// # Errors
    ///
    /// Fails when the entry is present but not convertible to `T`.
    pub fn opt_field<T: FromProperty>(&mut self, key: &str) -> Result<Option<T>, UnmarshalError> {
        match self.object.get(key) {
            None => Ok(None),
            Some(entry) => {
                let (value, secret) = unmarshal(self.ctx, entry)?;
                self.secret |= secret;
                Ok(value)
            }
        }
    }

    /// Whether any field read so far was marked secret.
    #[must_use]
    pub fn secret(&self) -> bool {
        self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::OutputValue;
    use stratus_core::urn::Urn;

    fn registry() -> ResourceRegistry {
        ResourceRegistry::new()
    }

    #[test]
    fn tolerant_version_parse() {
        assert_eq!(parse_reference_version("").unwrap(), None);
        assert_eq!(
            parse_reference_version("1").unwrap(),
            Some(Version::new(1, 0, 0))
        );
        assert_eq!(
            parse_reference_version("v1.2").unwrap(),
            Some(Version::new(1, 2, 0))
        );
        assert_eq!(
            parse_reference_version("1.2.3").unwrap(),
            Some(Version::new(1, 2, 3))
        );
        assert!(matches!(
            parse_reference_version("not-a-version"),
            Err(UnmarshalError::InvalidProviderVersion(_))
        ));
    }

    #[test]
    fn typed_scalar_mismatch_is_an_error() {
        let registry = registry();
        let ctx = UnmarshalContext::new(&registry);
        let err = unmarshal::<bool>(&ctx, &PropertyValue::Number(1.0)).unwrap_err();
        assert_eq!(err.to_string(), "expected a bool, got a number");
    }

    #[test]
    fn typed_driver_peels_wrappers() {
        let registry = registry();
        let ctx = UnmarshalContext::new(&registry);

        let secret_wire =
            PropertyValue::Secret(Box::new(PropertyValue::String("shh".to_string())));
        let (value, secret) = unmarshal::<String>(&ctx, &secret_wire).unwrap();
        assert_eq!(value.as_deref(), Some("shh"));
        assert!(secret);

        let unknown_output = PropertyValue::Output(OutputValue {
            element: Box::new(PropertyValue::Null),
            known: false,
            secret: true,
            dependencies: Vec::new(),
        });
        let (value, secret) = unmarshal::<String>(&ctx, &unknown_output).unwrap();
        assert_eq!(value, None);
        assert!(secret);
    }

    #[test]
    fn string_accepts_resource_references() {
        let registry = registry();
        let ctx = UnmarshalContext::new(&registry);

        let with_id = PropertyValue::ResourceReference(ResourceReferenceValue::new(
            Urn::new("urn:r"),
            Some("i-42".to_string()),
        ));
        let (value, _) = unmarshal::<String>(&ctx, &with_id).unwrap();
        assert_eq!(value.as_deref(), Some("i-42"));

        let without_id =
            PropertyValue::ResourceReference(ResourceReferenceValue::new(Urn::new("urn:r"), None));
        let (value, _) = unmarshal::<String>(&ctx, &without_id).unwrap();
        assert_eq!(value.as_deref(), Some("urn:r"));
    }

    #[test]
    fn malformed_asset_wire_fails() {
        let registry = registry();
        let ctx = UnmarshalContext::new(&registry);
        let err = unmarshal_value(&ctx, &PropertyValue::Asset(AssetValue::default())).unwrap_err();
        assert!(matches!(err, UnmarshalError::MalformedAsset));
    }

    #[test]
    fn internal_keys_are_skipped_in_generic_maps() {
        let registry = registry();
        let ctx = UnmarshalContext::new(&registry);
        let mut object = PropertyMap::new();
        object.insert("name".to_string(), PropertyValue::String("x".to_string()));
        object.insert("__internal".to_string(), PropertyValue::Bool(true));

        let (value, _) = unmarshal_value(&ctx, &PropertyValue::Object(object)).unwrap();
        let Input::Map(map) = value else {
            panic!("expected map");
        };
        assert!(map.contains_key("name"));
        assert!(!map.contains_key("__internal"));
    }
}
