use std::fmt;
use std::str::FromStr;

/// Which mock's canned responses to serve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FixtureSet {
    /// Web portal and wizard pages.
    #[default]
    Portal,
    /// Older single-page config screen with long JSON keys.
    Legacy,
}

impl FixtureSet {
    pub fn lookup(&self, route: &str) -> Option<&'static str> {
        self.table()
            .iter()
            .find(|(name, _)| *name == route)
            .map(|(_, body)| *body)
    }
    pub fn routes(&self) -> impl Iterator<Item = &'static str> {
        self.table().iter().map(|(name, _)| *name)
    }
    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            FixtureSet::Portal => PORTAL,
            FixtureSet::Legacy => LEGACY,
        }
    }
}

impl FromStr for FixtureSet {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "portal" => Ok(FixtureSet::Portal),
            "legacy" => Ok(FixtureSet::Legacy),
            _ => Err(format!("unknown fixture set '{}'", s)),
        }
    }
}

impl fmt::Display for FixtureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureSet::Portal => write!(f, "portal"),
            FixtureSet::Legacy => write!(f, "legacy"),
        }
    }
}

const PORTAL: &[(&str, &str)] = &[
    ("scale_action", r#"{"a0":1}"#),
    (
        "profile_summary",
        r#"{"s0":{"0":"AR2208,gr","1":"AR2209,gr","2":"NewProfile2","3":"NewProfile3","4":"NewProfile4","5":"NewProfile5","6":"NewProfile6","7":"NewProfile7"},"s1":2}"#,
    ),
    ("scale_config", r#"{"s0":0,"s1":2}"#),
    (
        "profile_config",
        r#"{"pf":1,"p0":0,"p1":0,"p2":"AR2209,gr","p3":0.025,"p4":0.000,"p5":0.300,"p6":0.100,"p7":5.000,"p8":2.000,"p9":0.000,"p10":10.000,"p11":0.080,"p12":5.000}"#,
    ),
    (
        "charge_mode_config",
        r##"{"c1":"#00ff00","c2":"#ffff00","c3":"#ff0000","c4":"#0000ff","c5":3.000,"c6":0.030,"c7":0.020,"c8":0.020,"c9":0}"##,
    ),
    ("cleanup_mode_state", r#"{"s0":0,"s1":0.000}"#),
    (
        "wireless_config",
        r#"{"w0":"dummy_ssid","w2":"3","w3":30000,"w4":true}"#,
    ),
    (
        "coarse_motor_config",
        r#"{"m0":50.000,"m1":200,"m2":800,"m3":256,"m4":5,"m5":110,"m6":0.100,"m7":1.2500000,"m8":false,"m9":false}"#,
    ),
    (
        "fine_motor_config",
        r#"{"m0":50.000,"m1":200,"m2":800,"m3":256,"m4":5,"m5":110,"m6":0.100,"m7":2.1052630,"m8":false,"m9":false}"#,
    ),
    (
        "neopixel_led_config",
        r##"{"bl":"#ffffff","l1":"#404040","l2":"#404040"}"##,
    ),
    ("button_config", r#"{"b0":true}"#),
    ("servo_gate_config", r#"{"c0":true,"c1":0.050,"c2":0.125}"#),
    (
        "system_control",
        r#"{"s0":"8381FFF","s1":"1.2.10-dirty","s2":"8f201d6","s3":"Debug","s4":false,"s5":false,"s6":false}"#,
    ),
];

const LEGACY: &[(&str, &str)] = &[
    ("scale_config", r#"{"unit":"gram"}"#),
    (
        "charge_mode_config",
        r#"{"coarse_kp":0.200000,"coarse_ki":0.000000,"coarse_kd":1.000000,"fine_kp":5.000000,"fine_ki":0.000000,"fine_kd":20.000000,"error_margin_grain":0.030000,"zero_sd_margin_grain":0.020000,"zero_mean_stability_grain":0.040000}"#,
    ),
    (
        "wireless_config",
        r#"{"ssid":"YYYY","pw":"xxx","auth":"CYW43_AUTH_WPA2_AES_PSK","timeout_ms":30000,"configured":true}"#,
    ),
    (
        "system_control",
        r#"{"unique_id":"4C64A49","save_to_eeprom":false,"software_reboot":false,"erase_eeprom":false}"#,
    ),
    (
        "fine_motor_config",
        r#"{"angular_acceleration":2000.000000,"full_steps_per_rotation":200,"current_ma":500,"microsteps":256,"max_speed_rps":20,"r_sense":110}"#,
    ),
    (
        "coarse_motor_config",
        r#"{"angular_acceleration":2000.000000,"full_steps_per_rotation":200,"current_ma":500,"microsteps":256,"max_speed_rps":20,"r_sense":110}"#,
    ),
];
