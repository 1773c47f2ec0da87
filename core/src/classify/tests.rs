use super::*;

const VERTEX: &str = r#"
uniform float eTime;
uniform vec3 p_baseColor;
uniform mat4 uModelView;
varying vec2 vUv;

void main() {
    vUv = uv;
    gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);
}
"#;

const FRAGMENT: &str = r#"
precision mediump float;
uniform vec3 p_baseColor;
uniform sampler2D u_noise;
uniform highp float p_density;
uniform int pSteps;
uniform vec3 p_lightDir;
varying vec2 vUv;

void main() {
    gl_FragColor = vec4(p_baseColor * texture2D(u_noise, vUv).rgb * p_density, 1.0);
}
"#;

fn find<'a>(decls: &'a [Declaration], identifier: &str) -> &'a Declaration {
    decls
        .iter()
        .find(|d| d.identifier == identifier)
        .unwrap_or_else(|| panic!("{identifier} not declared"))
}

#[test]
fn test_scan_finds_supported_declarations_once() {
    let decls = scan_declarations(VERTEX, FRAGMENT);
    let names: Vec<&str> = decls.iter().map(|d| d.identifier.as_str()).collect();
    assert_eq!(
        names,
        ["eTime", "p_baseColor", "u_noise", "p_density", "pSteps", "p_lightDir"]
    );
}

#[test]
fn test_unsupported_types_are_ignored() {
    let decls = scan_declarations(VERTEX, FRAGMENT);
    assert!(decls.iter().all(|d| d.identifier != "uModelView"));
}

#[test]
fn test_base_color_is_persistent_debug_color() {
    let decls = scan_declarations(VERTEX, FRAGMENT);
    let base = &find(&decls, "p_baseColor").classification;
    assert_eq!(base.bare_name, "baseColor");
    assert_eq!(base.ty, UniformType::Color);
    assert!(base.policy.persistent);
    assert!(base.policy.debug_visible);
    assert_eq!(base.policy.scope, Scope::Shared);
}

#[test]
fn test_unique_sampler() {
    let decls = scan_declarations(VERTEX, FRAGMENT);
    let noise = find(&decls, "u_noise");
    assert_eq!(noise.declared_type, UniformType::Sampler2D);
    assert_eq!(noise.classification.bare_name, "noise");
    assert_eq!(noise.classification.ty, UniformType::Sampler2D);
    assert!(!noise.classification.policy.persistent);
    assert!(!noise.classification.policy.debug_visible);
    assert_eq!(noise.classification.policy.scope, Scope::Unique);
}

#[test]
fn test_vec3_without_color_name_stays_vec3() {
    let decls = scan_declarations(VERTEX, FRAGMENT);
    assert_eq!(
        find(&decls, "p_lightDir").classification.ty,
        UniformType::Vec3
    );
}

#[test]
fn test_precision_qualifier_is_skipped() {
    let decls = scan_declarations("", FRAGMENT);
    assert_eq!(find(&decls, "p_density").declared_type, UniformType::Float);
}

#[test]
fn test_engine_fed_time() {
    let decls = scan_declarations(VERTEX, "");
    let time = &find(&decls, "eTime").classification;
    assert_eq!(time.bare_name, "Time");
    assert!(time.policy.engine_fed);
    assert!(!time.policy.persistent);
}

#[test]
fn test_color_names() {
    assert!(is_color_name("baseColor"));
    assert!(is_color_name("FOG_COLOUR"));
    assert!(!is_color_name("density"));

    assert_eq!(classify("p_tint", UniformType::Vec3).ty, UniformType::Vec3);
    assert_eq!(classify("pSkyColour", UniformType::Vec3).ty, UniformType::Color);
    // Only vec3 is reinterpreted
    assert_eq!(classify("p_color", UniformType::Vec4).ty, UniformType::Vec4);
}

#[test]
fn test_unprefixed_names_are_plain() {
    let c = classify("resolution", UniformType::Vec2);
    assert_eq!(c.bare_name, "resolution");
    assert_eq!(c.policy, PrefixPolicy::PLAIN);
}
