pub(super) fn default_config_toml() -> &'static str {
    r##"# Weld widget configuration
# Only override what you want to change -- missing fields use defaults.

[widget]
name = "weld"
# url = "file:///path/to/index.html"   # default: <config dir>/weld/<name>/index.html
# transparent = true
# devtools = false
# width = 400            # 1-8192
# height = 60            # 1-8192
# runtime = "weld_page.js"   # page runtime module; "" to start it yourself

[mask]
# enabled = false        # clicks pass through everywhere except marked elements
# marker_class = "mask"  # CSS class that marks an element as a mask
# throttle_ms = 100      # 0-1000
# poll = true            # re-measure marked elements every frame

[dimension]
# sync = false           # resize the window to follow the page body
"##
}
