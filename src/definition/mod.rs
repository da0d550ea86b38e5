/// Goto definition support.
///
/// This module resolves "go to definition" requests over raw line text.
/// There is no parser and no index, so disambiguation relies on keyword
/// anchoring plus cursor-column containment, with matchers tried in one
/// fixed order.
///
/// Supported constructs:
///   - **Class references**: `##class(ClassName)` anywhere in a line
///   - **Members**: `##class(ClassName).Member` and `..Member` self
///     references, resolved through the Atelier query service (the class
///     dictionary knows about inherited members; line text does not)
///   - **Macros**: `$$$MACRO`, found in the current document's `#define` /
///     `#def1arg` directives or located server-side via the class's
///     include files
///   - **Superclasses and types**: `Extends Name`, `As Name`, `Of Name`,
///     and parenthesized `Extends (A, B, C)` lists
///   - **Includes**: `#Include Name` directives and
///     `Include (A, B)` lists
///
/// - [`resolve`]: Entry point and strategy order, name normalization,
///   the keyword / superclass-list / include matchers, and link builders.
/// - [`member`]: `##class(...)` and `..Member` resolution, plus the
///   mapping of remote member rows back into links.
/// - [`macros`]: `$$$MACRO` resolution: same-document scan, static
///   include gathering, remote fallback.
mod macros;
mod member;
mod resolve;
