//! Invocation pipeline
//!
//! Every constructor call, method call and field access passes through the
//! same gates, in order, stopping at the first failure:
//!
//! 1. accessibility (`Inaccessible`, or `InvalidUsage` when the receiver is
//!    not an instance of the declaring class)
//! 2. static/instance consistency (`Invocation` without a cause)
//! 3. argument matching (`MismatchedArguments`)
//! 4. the platform call (`Invocation` carrying the platform failure)
//!
//! Nothing is cached or retried; each call starts again at step 1.

use mirror_sdk::{ClassId, PlatformError, PlatformResult, ReflectContext, Value};

use crate::error::{MirrorError, MirrorResult};
use crate::format;
use crate::member::{Accessible, Parameterized};

/// Run a constructor or method through the pipeline
#[tracing::instrument(level = "debug", skip_all, fields(member = ?handle.member_ref()))]
pub(crate) fn invoke<'a, H, F>(
    handle: &H,
    instance: Option<&Value>,
    args: &[Value],
    call: F,
) -> MirrorResult<Value>
where
    H: Parameterized<'a> + Accessible<'a>,
    F: FnOnce(&dyn ReflectContext, Option<&Value>) -> PlatformResult<Value>,
{
    let receiver = resolve_receiver(handle, instance)?;
    check_arguments(handle, &handle.parameter_types(), args)?;

    let result = call(handle.mirror().context(), receiver);
    match result {
        Ok(value) => {
            tracing::debug!("invocation succeeded");
            Ok(value)
        }
        Err(cause) => {
            tracing::debug!(%cause, "platform call failed");
            Err(platform_failure(handle, cause))
        }
    }
}

/// Steps 1 and 2: pass the gate, then check the receiver fits the member
pub(crate) fn resolve_receiver<'a, 'v, H>(
    handle: &'v H,
    instance: Option<&'v Value>,
) -> MirrorResult<Option<&'v Value>>
where
    H: Accessible<'a>,
{
    let explicit = instance.filter(|value| !value.is_null());
    let is_static = handle.is_static_context();
    let receiver = if is_static {
        None
    } else {
        explicit.or_else(|| handle.bound_instance())
    };

    handle.require_accessible(receiver)?;

    if is_static && explicit.is_some() {
        tracing::debug!("instance supplied to a static member");
        return Err(invocation_error(
            handle,
            "an instance was supplied to a member that takes none",
            None,
        ));
    }
    if !is_static && receiver.is_none() {
        tracing::debug!("no instance for an instance member");
        return Err(invocation_error(
            handle,
            "no instance was supplied to an instance member",
            None,
        ));
    }
    Ok(receiver)
}

/// Step 3: compare the arguments with the declared types
pub(crate) fn check_arguments<'a, H>(
    handle: &H,
    declared: &[ClassId],
    args: &[Value],
) -> MirrorResult<()>
where
    H: Accessible<'a>,
{
    let mirror = handle.mirror();
    let ctx = mirror.context();
    if mirror.argument_matcher().matches(ctx, declared, args) {
        return Ok(());
    }

    tracing::debug!(provided = args.len(), expected = declared.len(), "arguments rejected");
    Err(MirrorError::MismatchedArguments {
        signature: handle.signature(),
        class: mirror.class_name(handle.declaring_class_id()),
        expected: declared.iter().map(|&ty| format::type_name(ctx, ty)).collect(),
        provided: format::describe_values(args),
    })
}

/// Step 4 failure: wrap what the platform raised
pub(crate) fn platform_failure<'a, H>(handle: &H, cause: PlatformError) -> MirrorError
where
    H: Accessible<'a>,
{
    let reason = match &cause {
        PlatformError::Thrown { .. } => "the invoked code raised an exception",
        _ => "the platform rejected the call",
    };
    invocation_error(handle, reason, Some(cause))
}

fn invocation_error<'a, H>(handle: &H, reason: &str, cause: Option<PlatformError>) -> MirrorError
where
    H: Accessible<'a>,
{
    MirrorError::Invocation {
        signature: handle.signature(),
        class: handle.mirror().class_name(handle.declaring_class_id()),
        reason: reason.to_string(),
        cause,
    }
}
