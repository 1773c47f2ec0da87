//! Persistence of the registry
//!
//! The registry's tree is flat: one leaf per persistent parameter, keyed by
//! canonical name. Entries naming parameters nobody has registered yet are
//! adopted so that a later shader declaration finds the saved value; entries
//! whose prefix marks them non-persistent are dropped like any other
//! non-persistent value.

use crate::sync::{DataTree, FieldMut, FieldRef, PersistedUniform, SyncError, SyncNode};
use crate::texture::TextureResolver;

use super::ParameterRegistry;

impl SyncNode for ParameterRegistry {
    fn fields(&self) -> Vec<(&str, FieldRef<'_>)> {
        self.parameters
            .iter()
            .map(|parameter| (parameter.name(), FieldRef::Parameter(parameter)))
            .collect()
    }

    fn fields_mut(&mut self) -> Vec<(&str, FieldMut<'_>)> {
        self.parameters_mut()
            .map(|(name, parameter)| (name, FieldMut::Parameter(parameter)))
            .collect()
    }

    fn debug_visible(&self) -> bool {
        true
    }

    fn adopts_unknown_keys(&self) -> bool {
        true
    }

    fn import_from(
        &mut self,
        tree: &DataTree,
        textures: &mut dyn TextureResolver,
    ) -> Result<(), SyncError> {
        for (key, raw) in tree {
            let leaf = PersistedUniform::from_value(key, raw)?;

            let Some(id) = self.id_of(key) else {
                if !Self::adopted_policy(key).persistent {
                    tracing::debug!("Skipping non-persistent entry '{}'", key);
                    continue;
                }
                let uniform = leaf.decode(textures)?;
                self.adopt(key, uniform);
                continue;
            };

            let parameter = &mut self.parameters[id.0];
            if !parameter.persistent {
                tracing::debug!("Skipping non-persistent parameter '{}'", key);
                continue;
            }
            parameter.uniform = leaf.decode_as(parameter.uniform_type(), textures)?;
        }
        Ok(())
    }
}
