//! Router scope emission.
//!
//! Each router becomes a Swift class conforming to `TRPCClientData`. Nested
//! routers are nested classes reached through a `lazy var` on their parent and
//! forward `url` and `middlewares` to it, so the whole tree shares the root's
//! transport configuration.

use crate::context::GenerationContext;
use crate::naming::{escape_keyword, member_name, type_name};
use crate::procedure::emit_procedure;
use crate::resolver::TypeResolver;
use std::collections::HashSet;
use trpc_swift_core::{GenerationResult, ProcedureDef, RouterEntry, RouterNode};

/// Members every scope class declares for itself.
const SCOPE_MEMBERS: &[&str] = &["url", "middlewares", "clientData"];

enum MemberKind<'r> {
    Procedure(&'r ProcedureDef),
    Router {
        node: &'r RouterNode,
        class_name: String,
    },
}

struct Member<'r> {
    key: &'r str,
    name: String,
    kind: MemberKind<'r>,
}

/// Emit the members of one router scope, children in declaration order.
///
/// An empty router yields an empty string.
pub fn emit_router_members(
    resolver: &mut TypeResolver<'_>,
    router: &RouterNode,
    ctx: &GenerationContext<'_>,
) -> GenerationResult<String> {
    tracing::debug!(
        depth = ctx.route_depth,
        scope = %ctx.route_path.join("."),
        children = router.children.len(),
        "emitting router scope"
    );

    let mut taken: HashSet<String> = SCOPE_MEMBERS.iter().map(|m| m.to_string()).collect();
    let mut members = Vec::with_capacity(router.children.len());
    for (key, entry) in &router.children {
        let name = resolver.registry().claim_member(&member_name(key), &mut taken)?;
        let kind = match entry {
            RouterEntry::Procedure(procedure) => MemberKind::Procedure(procedure),
            RouterEntry::Router(node) => MemberKind::Router {
                node,
                class_name: resolver
                    .registry_mut()
                    .claim(&format!("{}Route", type_name(key)), &ctx.visible_model_names)?,
            },
        };
        members.push(Member {
            key: key.as_str(),
            name,
            kind,
        });
    }

    // Models must not shadow this scope's members or route classes.
    let scope = ctx
        .clone()
        .with_visible(members.iter().flat_map(|member| match &member.kind {
            MemberKind::Router { class_name, .. } => vec![member.name.clone(), class_name.clone()],
            MemberKind::Procedure(_) => vec![member.name.clone()],
        }));

    let mut blocks = Vec::with_capacity(members.len());
    for member in &members {
        let block = match &member.kind {
            MemberKind::Procedure(procedure) => {
                emit_procedure(resolver, procedure, member.key, &member.name, &scope)?
            }
            MemberKind::Router { node, class_name } => {
                emit_child_router(resolver, node, member, class_name, &scope)?
            }
        };
        blocks.push(block);
    }
    Ok(blocks.join("\n"))
}

fn emit_child_router(
    resolver: &mut TypeResolver<'_>,
    router: &RouterNode,
    member: &Member<'_>,
    class_name: &str,
    ctx: &GenerationContext<'_>,
) -> GenerationResult<String> {
    let access = ctx.access();
    let body = emit_router_members(resolver, router, &ctx.child(member.key))?;

    let mut code = format!(
        "{access}lazy var {} = {class_name}(clientData: self)\n\n",
        escape_keyword(&member.name)
    );
    code.push_str(&format!("{access}class {class_name}: TRPCClientData {{\n"));
    code.push_str("unowned let clientData: TRPCClientData\n");
    code.push_str("var url: URL { clientData.url }\n");
    code.push_str("var middlewares: [TRPCMiddleware] { clientData.middlewares }\n");
    code.push_str("\ninit(clientData: TRPCClientData) {\n");
    code.push_str("self.clientData = clientData\n");
    code.push_str("}\n");
    if !body.is_empty() {
        code.push('\n');
        code.push_str(&body);
    }
    code.push_str("}\n");
    Ok(code)
}

/// The root client class around already emitted `members` and `models`.
pub fn render_root_class(
    root_name: &str,
    members: &str,
    models: &str,
    ctx: &GenerationContext<'_>,
) -> String {
    let mut code = format!("{}class {root_name}: TRPCClientData {{\n", ctx.access());
    code.push_str("let url: URL\n");
    code.push_str("var middlewares: [TRPCMiddleware] = []\n");
    code.push_str("\ninit(baseUrl: URL, middlewares: [TRPCMiddleware] = []) {\n");
    code.push_str("self.url = baseUrl\n");
    code.push_str("self.middlewares = middlewares\n");
    code.push_str("}\n");
    for block in [members, models] {
        if !block.is_empty() {
            code.push('\n');
            code.push_str(block);
        }
    }
    code.push_str("}\n");
    code
}
