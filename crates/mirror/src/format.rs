//! Pretty signatures for diagnostics
//!
//! Stateless helpers that render members the way error messages show them:
//! `MockClass(String, int)` for constructors and `greet(String)` for methods.

use mirror_sdk::{ClassId, ConstructorInfo, MethodInfo, ParameterInfo, ReflectContext, Value};

/// Qualified class name, or the raw ID if the class is unknown
pub fn class_name(ctx: &dyn ReflectContext, class: ClassId) -> String {
    ctx.class_info(class)
        .map(|info| info.name)
        .unwrap_or_else(|| class.to_string())
}

/// Simple type name, or the raw ID if the type is unknown
pub fn type_name(ctx: &dyn ReflectContext, ty: ClassId) -> String {
    ctx.class_info(ty)
        .map(|info| info.simple_name)
        .unwrap_or_else(|| ty.to_string())
}

/// Simple names of the parameter types, in order
pub fn parameter_type_names(ctx: &dyn ReflectContext, parameters: &[ParameterInfo]) -> Vec<String> {
    parameters
        .iter()
        .map(|param| type_name(ctx, param.ty))
        .collect()
}

/// `ClassName(Type, Type)`
pub fn constructor_signature(ctx: &dyn ReflectContext, constructor: &ConstructorInfo) -> String {
    format!(
        "{}({})",
        type_name(ctx, constructor.id.class),
        parameter_type_names(ctx, &constructor.parameters).join(", ")
    )
}

/// `name(Type, Type)`
pub fn method_signature(ctx: &dyn ReflectContext, method: &MethodInfo) -> String {
    format!(
        "{}({})",
        method.name,
        parameter_type_names(ctx, &method.parameters).join(", ")
    )
}

/// Argument values as shown in mismatch reports
pub fn describe_values(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .map(|value| match value {
            Value::Str(s) => format!("\"{}\"", s),
            other => other.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_runtime::{core_class_ids::*, ClassBuilder, ConstructorDef, MethodDef, Param, Runtime};
    use mirror_sdk::Modifiers;

    #[test]
    fn test_signatures() {
        let rt = Runtime::new();
        let class = rt
            .define(
                ClassBuilder::class("app.Greeter")
                    .constructor(
                        ConstructorDef::new(Modifiers::PUBLIC)
                            .param(Param::new("name", STRING))
                            .param(Param::new("times", INT)),
                    )
                    .method(MethodDef::new("reset", VOID, Modifiers::PUBLIC)),
            )
            .unwrap();

        let ctor = &rt.declared_constructors(class)[0];
        assert_eq!(constructor_signature(&rt, ctor), "Greeter(String, int)");
        let method = &rt.declared_methods(class)[0];
        assert_eq!(method_signature(&rt, method), "reset()");
        assert_eq!(class_name(&rt, class), "app.Greeter");
    }

    #[test]
    fn test_unknown_types_fall_back_to_ids() {
        let rt = Runtime::new();
        assert_eq!(type_name(&rt, ClassId::new(500)), "class#500");
        assert_eq!(class_name(&rt, ClassId::new(500)), "class#500");
    }

    #[test]
    fn test_describe_values() {
        let values = [Value::from("bob"), Value::from(42), Value::Null];
        assert_eq!(describe_values(&values), vec!["\"bob\"", "42", "null"]);
    }
}
