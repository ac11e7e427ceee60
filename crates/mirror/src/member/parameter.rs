//! Parameter handles

use std::borrow::Cow;

use mirror_sdk::{Annotation, ClassId, MemberRef, ParameterInfo};

use super::{Annotated, Declared, MClass, Named, Reflected, Typed};
use crate::Mirror;

/// Handle to one parameter of a constructor or method
#[derive(Debug, Clone)]
pub struct MParameter<'a> {
    mirror: Mirror<'a>,
    info: ParameterInfo,
    owner: MemberRef,
}

impl<'a> MParameter<'a> {
    pub(crate) fn from_raw(mirror: Mirror<'a>, owner: MemberRef, info: ParameterInfo) -> Self {
        Self {
            mirror,
            info,
            owner,
        }
    }

    /// Position in the parameter list
    pub fn index(&self) -> usize {
        self.info.index
    }

    /// The constructor or method declaring this parameter
    pub fn owner(&self) -> MemberRef {
        self.owner
    }

    /// Raw parameter record
    pub fn raw(&self) -> &ParameterInfo {
        &self.info
    }

    /// Declared type
    pub fn parameter_type(&self) -> ClassId {
        self.info.ty
    }

    /// Handle to the declared type
    pub fn parameter_class(&self) -> Option<MClass<'a>> {
        self.mirror.class(self.info.ty)
    }
}

impl<'a> Reflected<'a> for MParameter<'a> {
    fn mirror(&self) -> Mirror<'a> {
        self.mirror
    }
}

impl Named for MParameter<'_> {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.info.name)
    }
}

impl Typed for MParameter<'_> {
    fn declared_type(&self) -> ClassId {
        self.info.ty
    }
}

impl<'a> Annotated<'a> for MParameter<'a> {
    fn raw_annotations(&self) -> &[Annotation] {
        &self.info.annotations
    }
}

impl<'a> Declared<'a> for MParameter<'a> {
    fn declaring_class_id(&self) -> ClassId {
        self.owner.declaring_class()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Parameterized;
    use mirror_runtime::{core_class_ids::*, ClassBuilder, MethodDef, Param, Runtime};
    use mirror_sdk::Modifiers;

    #[test]
    fn test_parameter_queries() {
        let rt = Runtime::new();
        let marker = rt.define(ClassBuilder::annotation("app.NotNull")).unwrap();
        let class = rt
            .define(
                ClassBuilder::class("app.Mailer").method(
                    MethodDef::new("send", BOOLEAN, Modifiers::PUBLIC)
                        .param(Param::new("to", STRING).annotate(Annotation::marker(marker)))
                        .param(Param::new("retries", INT))
                        .param(Param::new("subject", STRING)),
                ),
            )
            .unwrap();
        let send = Mirror::new(&rt).class(class).unwrap().method_named("send").unwrap();

        assert!(send.has_parameters());
        assert_eq!(send.parameter_count(), 3);
        assert_eq!(send.parameter_types(), vec![STRING, INT, STRING]);

        let names: Vec<_> = send.parameters().map(|p| p.name().into_owned()).collect();
        assert_eq!(names, vec!["to", "retries", "subject"]);
        assert_eq!(send.parameters_of_type(STRING).count(), 2);
        assert_eq!(send.parameter_of_type(INT).map(|p| p.index()), Some(1));
        assert!(send.parameter_of_type(LONG).is_none());

        let annotated = send.parameters_with_annotations(&[marker]);
        assert_eq!(annotated.len(), 1);
        assert_eq!(annotated[0].name(), "to");
        assert!(annotated[0].is_annotated_with(marker));
        assert_eq!(
            send.parameter_with_annotations(&[marker]).map(|p| p.index()),
            Some(0)
        );

        let subject = send.parameter(|p| p.name() == "subject").unwrap();
        assert_eq!(subject.owner(), MemberRef::Method(send.id()));
        assert_eq!(subject.declaring_class().unwrap().id(), class);
        assert_eq!(subject.parameter_class().unwrap().simple_name(), "String");
        assert_eq!(send.parameters_matching(|p| p.index() > 0).count(), 2);
    }
}
