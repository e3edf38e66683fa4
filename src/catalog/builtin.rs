use crate::catalog::model::{EffectDefinition, ParamSpec};

/// Built-in effect catalog, in menu order.
pub fn builtin_effects() -> Vec<EffectDefinition> {
    vec![
        EffectDefinition::new(
            "No Effect",
            "export default function NoEffect({ text }) {\n  return <div>{text}</div>;\n}\n",
            "plain",
        )
        .with_code_name("NoEffect"),
        EffectDefinition::new("Fader", FADER, "fade")
            .with_param(
                ParamSpec::number("duration", 1.0)
                    .with_label("Duration")
                    .with_range(0.1, 5.0, 0.1),
            ),
        EffectDefinition::new("Cascading", CASCADING, "cascade").with_param(
            ParamSpec::number("stagger", 0.1)
                .with_label("Stagger Delay")
                .with_range(0.01, 1.0, 0.01),
        ),
        EffectDefinition::new("Rotator", ROTATOR, "rotate").with_param(
            ParamSpec::number("duration", 2.0)
                .with_label("Rotation Duration")
                .with_range(0.5, 10.0, 0.5),
        ),
        EffectDefinition::new("Neon Glowing Text", NEON_TEXT, "neon")
            .with_code_name("NeonText")
            .with_param(ParamSpec::color("color", "#ff00ff").with_label("Text Color"))
            .with_param(ParamSpec::color("glowColor", "#ff00ff").with_label("Glow Color"))
            .with_param(
                ParamSpec::number("glowStrength", 5.0)
                    .with_label("Glow Strength")
                    .with_range(1.0, 10.0, 0.1),
            )
            .with_param(
                ParamSpec::number("glowBlur", 10.0)
                    .with_label("Glow Blur")
                    .with_range(1.0, 20.0, 1.0),
            ),
        EffectDefinition::new("Bouncy Text", BOUNCY_TEXT, "bounce").with_code_name("BouncyText"),
        EffectDefinition::new(
            "MicroTextWeightShiftEffect",
            MICRO_TEXT_WEIGHT_SHIFT,
            "blur-shift",
        ),
        EffectDefinition::new("SoftFocusPulseEffect", SOFT_FOCUS_PULSE, "hover-weight"),
        EffectDefinition::new("GentleOpacityFadeEffect", GENTLE_OPACITY_FADE, "char-fade"),
    ]
}

const FADER: &str = r#"import { motion } from 'framer-motion';

export default function Fader({ text }) {
  return (
    <motion.div
      initial={{ opacity: 0 }}
      animate={{ opacity: 1 }}
      transition={{ duration: {duration} }}
    >
      {text}
    </motion.div>
  );
}
"#;

const CASCADING: &str = r#"import { motion } from 'framer-motion';

export default function Cascading({ text }) {
  return (
    <motion.div
      initial={{ opacity: 0 }}
      animate={{ opacity: 1 }}
      transition={{ staggerChildren: {stagger} }}
    >
      {text.split('').map((char, index) => (
        <motion.span key={index} initial={{ opacity: 0 }} animate={{ opacity: 1 }} transition={{ delay: index * {stagger} }}>
          {char}
        </motion.span>
      ))}
    </motion.div>
  );
}
"#;

const ROTATOR: &str = r#"import { motion } from 'framer-motion';

export default function Rotator({ text }) {
  return (
    <motion.div
      initial={{ rotate: 0 }}
      animate={{ rotate: 360 }}
      transition={{ duration: {duration} }}
    >
      {text}
    </motion.div>
  );
}
"#;

const NEON_TEXT: &str = r#"import { motion } from 'framer-motion';

export default function NeonText({ text }) {
  return (
    <motion.span
      style={{ color: {color}, fontWeight: 'bold', textShadow: '{glowStrength}px {glowStrength}px {glowBlur}px {glowColor}' }}
      animate={{
        textShadow: [
          '{glowStrength}px {glowStrength}px {glowBlur}px {glowColor}',
          '0px 0px 0px {glowColor}',
          '{glowStrength}px {glowStrength}px {glowBlur}px {glowColor}'
        ]
      }}
      transition={{
        duration: 2,
        repeat: Infinity,
        repeatType: 'reverse',
        ease: 'easeInOut'
      }}
    >
      {text}
    </motion.span>
  );
}
"#;

const BOUNCY_TEXT: &str = r#"import { motion } from 'framer-motion';

export default function BouncyText({ text }) {
  return (
    <motion.span
      style={{ display: 'inline-block' }}
      animate={{ y: [0, -30, 0] }}
      transition={{
        duration: 0.6,
        ease: 'easeOut',
        repeat: Infinity,
        repeatType: 'loop',
        repeatDelay: 0.5
      }}
    >
      {text}
    </motion.span>
  );
}
"#;

const MICRO_TEXT_WEIGHT_SHIFT: &str = r#"export default function MicroTextWeightShiftEffect({ text }) {
  return (
    <div className="h-full flex flex-wrap items-center justify-center p-4 overflow-auto">
      {text.split('').map((char, index) => (
        <motion.span
          key={index}
          className="inline-block text-2xl m-1"
          initial={{ filter: 'blur(2px)' }}
          animate={{ filter: 'blur(0px)' }}
          transition={{
            duration: 0.6,
            ease: 'easeInOut',
            repeat: Infinity,
            repeatType: 'reverse',
            delay: index * 0.05,
          }}
        >
          {char}
        </motion.span>
      ))}
    </div>
  );
}"#;

const SOFT_FOCUS_PULSE: &str = r#"export default function SoftFocusPulseEffect({ text }) {
  return (
    <div className="h-full flex flex-wrap items-center justify-center p-4 overflow-auto">
      {text.split('').map((char, index) => (
        <motion.span
          key={index}
          className="inline-block text-2xl m-1 font-light"
          whileHover={{ fontWeight: 700 }}
          transition={{ duration: 0.2, ease: 'easeInOut' }}
        >
          {char}
        </motion.span>
      ))}
    </div>
  );
}"#;

const GENTLE_OPACITY_FADE: &str = r#"export default function GentleOpacityFadeEffect({ text }) {
  return (
    <div className="h-full flex flex-wrap items-center justify-center p-4 overflow-auto">
      {text.split('').map((char, index) => (
        <motion.span
          key={index}
          className="inline-block text-2xl m-1"
          initial={{ opacity: 0 }}
          animate={{ opacity: 1 }}
          transition={{
            duration: 0.8,
            ease: 'easeOut',
            delay: index * 0.05,
          }}
        >
          {char}
        </motion.span>
      ))}
    </div>
  );
}"#;
