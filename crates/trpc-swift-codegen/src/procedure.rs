//! Procedure method emission.

use crate::context::GenerationContext;
use crate::model::member_access;
use crate::naming::{escape_keyword, string_literal, type_name};
use crate::resolver::{Site, TypeResolver};
use crate::swift_types::SwiftType;
use trpc_swift_core::{GenerationResult, ProcedureDef, ProcedureKind};

/// Emit the client method for the procedure stored under `key`.
///
/// `method` is the Swift name already chosen for it within its scope. Models
/// registered while resolving input and output stay in the resolver's
/// registry for the rest of the run.
pub fn emit_procedure(
    resolver: &mut TypeResolver<'_>,
    procedure: &ProcedureDef,
    key: &str,
    method: &str,
    ctx: &GenerationContext<'_>,
) -> GenerationResult<String> {
    let path = ctx.diagnostic_path(key);
    tracing::trace!(procedure = %path, kind = %procedure.kind, "emitting procedure");

    let input = match &procedure.input {
        Some(schema) => resolver.resolve(
            schema,
            &Site::new(format!("{path}.input"), format!("{}InputType", type_name(key))),
            ctx,
        )?,
        None => SwiftType::NoPayload,
    };
    let output = match &procedure.output {
        Some(schema) => resolver.resolve(
            schema,
            &Site::new(format!("{path}.output"), format!("{}OutputType", type_name(key))),
            ctx,
        )?,
        None => SwiftType::NoPayload,
    };

    let mut code = String::new();

    if let Some(description) = &procedure.description {
        for line in description.lines() {
            code.push_str(&format!("/// {}\n", line.trim_end()));
        }
    }
    if output == SwiftType::NoPayload {
        code.push_str("@discardableResult\n");
    }

    let (parameter, argument) = match &input {
        SwiftType::NoPayload => (String::new(), "TRPCClient.EmptyObject()"),
        ty if ty.is_optional() => (format!("input: {ty} = nil"), "input"),
        ty => (format!("input: {ty}"), "input"),
    };
    // A missing input is only passed at the call site, never declared.
    let signature = match &input {
        SwiftType::NoPayload => vec![&output],
        _ => vec![&input, &output],
    };
    let access = member_access(ctx.flags, resolver.registry().internal_models(), signature);
    code.push_str(&format!(
        "{access}func {}({parameter}) async throws -> {output} {{\n",
        escape_keyword(method)
    ));

    let url = format!(
        "url.appendingPathComponent({})",
        string_literal(&ctx.procedure_path(key))
    );
    match procedure.kind {
        ProcedureKind::Query => code.push_str(&format!(
            "return try await TRPCClient.shared.sendQuery(url: {url}, middlewares: middlewares, input: {argument})\n"
        )),
        ProcedureKind::Mutation => code.push_str(&format!(
            "return try await TRPCClient.shared.sendMutation(url: {url}, middlewares: middlewares, input: {argument})\n"
        )),
        ProcedureKind::Subscription => {
            tracing::warn!(procedure = %path, "subscriptions are not supported, emitting a throwing stub");
            code.push_str(
                "throw TRPCError(code: .methodNotSupported, message: \"Subscriptions are not supported by this client.\")\n",
            );
        }
    }

    code.push_str("}\n");
    Ok(code)
}
