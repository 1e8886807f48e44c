/// Instanced vertex shader shared by every pool.
/// Per-instance model matrix occupies locations 2..=5, color location 6.
pub const INSTANCED_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in mat4 a_instance_matrix;
layout(location = 6) in vec3 a_instance_color;

uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_world_position;
out vec3 v_normal;
out vec3 v_color;

void main() {
    vec4 world_pos = a_instance_matrix * vec4(a_position, 1.0);

    v_world_position = world_pos.xyz;
    // Non-uniform ribbon scale is mild; the upper 3x3 is close enough
    v_normal = mat3(a_instance_matrix) * a_normal;
    v_color = a_instance_color;

    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Lit fragment shader. `u_emissive` 1.0 renders the raw color (glowing
/// particles); lower values blend in diffuse and a specular highlight
/// scaled by `u_metalness` (ornaments, ribbon).
pub const INSTANCED_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_world_position;
in vec3 v_normal;
in vec3 v_color;

uniform vec3 u_camera_pos;
uniform vec3 u_light_dir;
uniform float u_emissive;
uniform float u_metalness;
uniform float u_opacity;

out vec4 fragColor;

void main() {
    vec3 normal = normalize(v_normal);
    vec3 light = normalize(u_light_dir);
    vec3 view_dir = normalize(u_camera_pos - v_world_position);

    float diffuse = max(dot(normal, light), 0.0);
    vec3 half_dir = normalize(light + view_dir);
    float specular = pow(max(dot(normal, half_dir), 0.0), 48.0) * u_metalness;

    // Rim keeps the silhouettes readable against the dark background
    float rim = pow(1.0 - max(dot(normal, view_dir), 0.0), 3.0) * 0.25;

    vec3 lit = v_color * (0.25 + 0.75 * diffuse) + vec3(specular) + v_color * rim;
    vec3 color = mix(lit, v_color, u_emissive);

    fragColor = vec4(color, u_opacity);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_attribute_locations() {
        assert!(INSTANCED_VERTEX_SHADER.contains("layout(location = 2) in mat4 a_instance_matrix"));
        assert!(INSTANCED_VERTEX_SHADER.contains("layout(location = 6) in vec3 a_instance_color"));
    }

    #[test]
    fn test_fragment_uniforms() {
        for name in ["u_camera_pos", "u_light_dir", "u_emissive", "u_metalness", "u_opacity"] {
            assert!(INSTANCED_FRAGMENT_SHADER.contains(name), "{} missing", name);
        }
    }
}
