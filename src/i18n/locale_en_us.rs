// en-US strings. Also the fallback table for keys missing elsewhere.

pub const EN_US: &[(&str, &str)] = &[
    ("common.back", "Back"),
    ("common.settings", "Settings"),
    ("common.rollDice", "Roll Dice"),
    ("common.rolling", "Rolling..."),
    ("common.selectDice", "Select Dice"),
    ("common.recentRolls", "Recent Rolls"),
    ("common.buttonAnimation", "Button Animation"),
    ("common.moveButton", "Move Button"),
    ("common.hideButton", "Hide Button"),
    ("common.particleIntensity", "Particle Intensity"),
    ("common.adjustParticleEffect", "Adjust the particle effect around the result"),
    ("common.rollDuration", "Roll Duration"),
    ("common.low", "Low"),
    ("common.high", "High"),
    ("common.seconds", "seconds"),
    ("common.diceSimulator", "Dice Simulator"),
    ("common.language", "Language"),
    ("common.chooseLanguage", "Choose Language"),
    ("common.chooseButtonBehavior", "Choose button behavior during roll"),
    ("common.setRollDuration", "Set roll animation duration (1-10 seconds)"),
    ("common.easingType", "Easing Type"),
    ("common.linear", "Linear"),
    ("common.quadratic", "Quadratic"),
    ("common.exponential", "Exponential"),
    ("common.sine", "Sine"),
    ("common.chooseEasingType", "Choose animation easing type"),
    ("diceTypes.d4", "D4"),
    ("diceTypes.d6", "D6"),
    ("diceTypes.d16", "D16"),
    ("diceTypes.d20", "D20"),
    ("errors.invalidInteger", "Please enter an integer between 1-10"),
    ("errors.enterRollTime", "Please enter roll time"),
];
