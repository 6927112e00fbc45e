//! Builds modules from document nodes by dispatching on the `kind` tag.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::JnnError;
use crate::model::Sequential;
use crate::nn::layers::layer_norm::DEFAULT_LAYER_NORM_EPS;
use crate::nn::layers::{Activation, ActivationKind, Embedding, LayerNorm, Linear};
use crate::nn::module::{Module, ModuleKind};
use crate::serialization::document::{ModuleDocument, ParameterDocument};
use crate::types::DType;

/// Rebuilds the subtree rooted at `node`.
///
/// The whole subtree is built before anything is returned, so a failure
/// anywhere yields an error and no partial tree.
pub(crate) fn build_module(node: &ModuleDocument) -> Result<Box<dyn Module>, JnnError> {
    let kind = ModuleKind::from_tag(&node.kind)?;
    if kind != ModuleKind::Sequential && !node.children.is_empty() {
        return Err(JnnError::MalformedDocument(format!(
            "'{}' node cannot have children",
            node.kind
        )));
    }
    let cfg = &node.config;
    // Initial values are overwritten below; a fixed seed keeps loading deterministic.
    let mut rng = StdRng::seed_from_u64(0);
    let dtype = document_dtype(&node.parameters);

    let mut module: Box<dyn Module> = match kind {
        ModuleKind::Linear => Box::new(Linear::with_rng(
            cfg.get_usize("in_features")?,
            cfg.get_usize("out_features")?,
            cfg.get_bool("bias")?,
            dtype,
            &mut rng,
        )?),
        ModuleKind::Activation => {
            let alpha = match cfg.get("alpha") {
                Some(_) => Some(cfg.get_f64("alpha")?),
                None => None,
            };
            Box::new(Activation::new(ActivationKind::from_name(cfg.get_str("function")?, alpha)?))
        }
        ModuleKind::LayerNorm => {
            let eps = match cfg.get("eps") {
                Some(_) => cfg.get_f64("eps")?,
                None => DEFAULT_LAYER_NORM_EPS,
            };
            Box::new(LayerNorm::new(
                cfg.get_usize("normalized_size")?,
                eps,
                cfg.get_bool("bias")?,
                dtype,
            )?)
        }
        ModuleKind::Embedding => Box::new(Embedding::with_rng(
            cfg.get_usize("num_embeddings")?,
            cfg.get_usize("embedding_dim")?,
            dtype,
            &mut rng,
        )?),
        ModuleKind::Sequential => {
            if !node.parameters.is_empty() {
                return Err(JnnError::MalformedDocument(
                    "'sequential' node cannot own parameters".to_string(),
                ));
            }
            let children = node
                .children
                .iter()
                .map(build_module)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Box::new(children.into_iter().collect::<Sequential>()));
        }
    };
    restore_parameters(module.as_mut(), &node.kind, &node.parameters)?;
    Ok(module)
}

/// Dtype recorded by the node's parameters, `F32` for parameter-free nodes.
fn document_dtype(parameters: &[ParameterDocument]) -> DType {
    parameters.first().map(|p| p.dtype).unwrap_or_default()
}

/// Copies the stored values into a freshly built leaf module.
///
/// The stored names must equal the module's own parameter names, in order.
fn restore_parameters(
    module: &mut dyn Module,
    kind: &str,
    stored: &[ParameterDocument],
) -> Result<(), JnnError> {
    let expected: Vec<String> = module
        .local_parameters()
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    let found: Vec<&str> = stored.iter().map(|p| p.name.as_str()).collect();
    if expected != found {
        return Err(JnnError::MalformedDocument(format!(
            "'{}' expects parameters {:?}, document has {:?}",
            kind, expected, found
        )));
    }
    let tensors = stored
        .iter()
        .map(ParameterDocument::to_tensor)
        .collect::<Result<Vec<_>, _>>()?;
    for (param, tensor) in module.parameters_mut().into_iter().zip(tensors) {
        param.set_value(tensor)?;
    }
    Ok(())
}

