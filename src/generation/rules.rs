//! Business rules for the generation domain

use crate::generation::{GenerationError, GenerationOptions};
use crate::model::{Model, NodeId, NodeKind};

/// Widest indentation accepted when indenting with spaces
pub const MAX_INDENT_SPACES: usize = 16;

/// Validates indentation settings
pub fn validate_options(options: &GenerationOptions) -> Result<(), GenerationError> {
    if options.use_tab {
        return Ok(());
    }

    if options.indent_spaces == 0 || options.indent_spaces > MAX_INDENT_SPACES {
        return Err(GenerationError::InvalidConfiguration(format!(
            "indent_spaces must be between 1 and {MAX_INDENT_SPACES}, got {}",
            options.indent_spaces
        )));
    }

    Ok(())
}

/// Validates that `base` can start a generation walk
pub fn validate_base(model: &Model, base: NodeId) -> Result<(), GenerationError> {
    let Some(node) = model.get(base) else {
        return Err(GenerationError::UnknownNode(base.0));
    };

    match node.kind {
        NodeKind::Package | NodeKind::Class(_) | NodeKind::Interface(_) | NodeKind::Enumeration(_) => {
            Ok(())
        }
        _ => Err(GenerationError::ValidationError(format!(
            "'{}' is a {} and cannot be generated on its own",
            node.name,
            node.kind.label()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelBuilder, NewNode, TypeRef};

    #[test]
    fn test_validate_options() {
        assert!(validate_options(&GenerationOptions::default()).is_ok());

        let zero = GenerationOptions {
            indent_spaces: 0,
            ..Default::default()
        };
        assert!(validate_options(&zero).is_err());

        let wide = GenerationOptions {
            indent_spaces: 17,
            ..Default::default()
        };
        assert!(validate_options(&wide).is_err());

        // Spaces are irrelevant when indenting with tabs
        let tabs = GenerationOptions {
            use_tab: true,
            indent_spaces: 0,
            ..Default::default()
        };
        assert!(validate_options(&tabs).is_ok());
    }

    #[test]
    fn test_validate_base() {
        let mut b = ModelBuilder::new("Model");
        let root = b.root();
        let class = b.add(root, NewNode::class("Widget"));
        let attr = b.add(class, NewNode::attribute("count", TypeRef::named("int")));
        let model = b.build();

        assert!(validate_base(&model, root).is_ok());
        assert!(validate_base(&model, class).is_ok());
        assert!(matches!(
            validate_base(&model, attr),
            Err(GenerationError::ValidationError(_))
        ));
        assert!(matches!(
            validate_base(&model, NodeId(99)),
            Err(GenerationError::UnknownNode(99))
        ));
    }
}
