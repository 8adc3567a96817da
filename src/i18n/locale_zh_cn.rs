// zh-CN strings. Keys absent here resolve through the en-US table.

pub const ZH_CN: &[(&str, &str)] = &[
    ("common.back", "返回"),
    ("common.settings", "设置"),
    ("common.rollDice", "掷骰子"),
    ("common.rolling", "掷骰中..."),
    ("common.selectDice", "选择骰子"),
    ("common.recentRolls", "最近投掷"),
    ("common.buttonAnimation", "按钮动画"),
    ("common.moveButton", "移动按钮"),
    ("common.hideButton", "隐藏按钮"),
    ("common.rollDuration", "投掷时长"),
    ("common.low", "低"),
    ("common.high", "高"),
    ("common.seconds", "秒"),
    ("common.diceSimulator", "骰子模拟器"),
    ("common.language", "语言"),
    ("common.chooseLanguage", "选择语言"),
    ("common.chooseButtonBehavior", "选择投掷时按钮行为"),
    ("common.setRollDuration", "设置投掷动画时长(1-10秒)"),
    ("common.easingType", "缓动类型"),
    ("common.linear", "线性减速"),
    ("common.quadratic", "二次缓动"),
    ("common.exponential", "指数缓动"),
    ("common.sine", "正弦缓动"),
    ("common.chooseEasingType", "选择动画缓动类型"),
    ("diceTypes.d4", "四面骰"),
    ("diceTypes.d6", "六面骰"),
    ("diceTypes.d16", "十六面骰"),
    ("diceTypes.d20", "二十面骰"),
    ("errors.invalidInteger", "请输入1-10之间的整数"),
    ("errors.enterRollTime", "请输入投掷时间"),
];
