use flow_lectures::{
    data_structures::light::{MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS},
    pipelines::{OMNI_SHADOW_SLOTS, basic::lit_shader_source},
};

fn declared_bound(source: &str, name: &str) -> Option<usize> {
    let prefix = format!("const {name}: u32 = ");
    source
        .lines()
        .find_map(|line| line.trim().strip_prefix(prefix.as_str()))
        .and_then(|value| value.trim_end_matches(';').trim_end_matches('u').parse().ok())
}

#[test]
fn should_declare_light_bounds_from_rust_constants() {
    let source = lit_shader_source();

    assert_eq!(declared_bound(&source, "MAX_POINT_LIGHTS"), Some(MAX_POINT_LIGHTS));
    assert_eq!(declared_bound(&source, "MAX_SPOT_LIGHTS"), Some(MAX_SPOT_LIGHTS));
}

#[test]
fn should_declare_each_light_bound_once() {
    let source = lit_shader_source();

    assert_eq!(source.matches("const MAX_POINT_LIGHTS").count(), 1);
    assert_eq!(source.matches("const MAX_SPOT_LIGHTS").count(), 1);
}

#[test]
fn should_bind_one_cube_shadow_map_per_omni_slot() {
    let source = lit_shader_source();

    assert_eq!(OMNI_SHADOW_SLOTS, MAX_POINT_LIGHTS + MAX_SPOT_LIGHTS);
    assert_eq!(source.matches(": texture_depth_cube;").count(), OMNI_SHADOW_SLOTS);
    // `sample_omni` switches over every slot: explicit cases plus the default.
    assert_eq!(
        source.matches("case ").count() + source.matches("default:").count(),
        OMNI_SHADOW_SLOTS
    );
}
