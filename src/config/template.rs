/// Contents written by `remap --init`.
pub fn generate_init_template() -> String {
	r#"# remap configuration
#
# remap looks for .remap.toml in the current directory and every parent,
# then in ~/.remap.toml. The nearest file that sets a value wins.

# Stop looking in parent directories (the user config is still read).
root = true

# Skip ~/.remap.toml when this environment variable is truthy.
# root-config-lookup-disable-env-var = "CI"

# Indices each `*` in a rule expands to. A rule with two wildcards
# checks expand-size^2 candidate paths.
expand-size = 1000

[conversion]
# Prefix for attribute keys.
attribute-prefix = "@"

# Key for text that sits beside attributes or child elements.
text-content-key = "$"

# Joins a namespace prefix and a local name.
namespace-separator = ":"

# Tags that always become lists, even with a single occurrence.
always-array = []

# Only promote repeated tags to lists.
auto-array = true

# Collapse text-only elements to their text.
auto-text = true

# Rename tags and attributes with a sed-like substitution.
# key-rewrite = "s/-/_/g"
"#
	.to_string()
}
