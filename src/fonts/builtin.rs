//! Built-in Helvetica base font
//!
//! Helvetica is one of the 14 standard PDF fonts every viewer provides, so it
//! needs no embedded font program, only a width table on our side so text
//! can be measured before it is placed. Values are the Adobe AFM advance
//! widths in 1/1000ths of the em square, indexed by WinAnsi code 32-255.

/// Helvetica advance widths for WinAnsiEncoding characters 32-255
pub const HELVETICA_WIDTHS: [u16; 224] = [
    278,  // 32 space
    278,  // 33 !
    355,  // 34 "
    556,  // 35 #
    556,  // 36 $
    889,  // 37 %
    667,  // 38 &
    191,  // 39 '
    333,  // 40 (
    333,  // 41 )
    389,  // 42 *
    584,  // 43 +
    278,  // 44 ,
    333,  // 45 -
    278,  // 46 .
    278,  // 47 /
    556,  // 48 0
    556,  // 49 1
    556,  // 50 2
    556,  // 51 3
    556,  // 52 4
    556,  // 53 5
    556,  // 54 6
    556,  // 55 7
    556,  // 56 8
    556,  // 57 9
    278,  // 58 :
    278,  // 59 ;
    584,  // 60 <
    584,  // 61 =
    584,  // 62 >
    556,  // 63 ?
    1015, // 64 @
    667,  // 65 A
    667,  // 66 B
    722,  // 67 C
    722,  // 68 D
    667,  // 69 E
    611,  // 70 F
    778,  // 71 G
    722,  // 72 H
    278,  // 73 I
    500,  // 74 J
    667,  // 75 K
    556,  // 76 L
    833,  // 77 M
    722,  // 78 N
    778,  // 79 O
    667,  // 80 P
    778,  // 81 Q
    722,  // 82 R
    667,  // 83 S
    611,  // 84 T
    722,  // 85 U
    667,  // 86 V
    944,  // 87 W
    667,  // 88 X
    667,  // 89 Y
    611,  // 90 Z
    278,  // 91 [
    278,  // 92 \
    278,  // 93 ]
    469,  // 94 ^
    556,  // 95 _
    333,  // 96 `
    556,  // 97 a
    556,  // 98 b
    500,  // 99 c
    556,  // 100 d
    556,  // 101 e
    278,  // 102 f
    556,  // 103 g
    556,  // 104 h
    222,  // 105 i
    222,  // 106 j
    500,  // 107 k
    222,  // 108 l
    833,  // 109 m
    556,  // 110 n
    556,  // 111 o
    556,  // 112 p
    556,  // 113 q
    333,  // 114 r
    500,  // 115 s
    278,  // 116 t
    556,  // 117 u
    500,  // 118 v
    722,  // 119 w
    500,  // 120 x
    500,  // 121 y
    500,  // 122 z
    334,  // 123 {
    260,  // 124 |
    334,  // 125 }
    584,  // 126 ~
    350,  // 127 DEL (placeholder)
    556,  // 128 Euro
    350,  // 129 undefined
    222,  // 130 single low quote
    556,  // 131 f with hook
    333,  // 132 double low quote
    1000, // 133 ellipsis
    556,  // 134 dagger
    556,  // 135 double dagger
    333,  // 136 circumflex
    1000, // 137 per mille
    667,  // 138 S caron
    333,  // 139 single left angle quote
    1000, // 140 OE
    350,  // 141 undefined
    611,  // 142 Z caron
    350,  // 143 undefined
    350,  // 144 undefined
    222,  // 145 left single quote
    222,  // 146 right single quote
    333,  // 147 left double quote
    333,  // 148 right double quote
    350,  // 149 bullet
    556,  // 150 en dash
    1000, // 151 em dash
    333,  // 152 tilde
    1000, // 153 trademark
    500,  // 154 s caron
    333,  // 155 single right angle quote
    944,  // 156 oe
    350,  // 157 undefined
    500,  // 158 z caron
    667,  // 159 Y dieresis
    278,  // 160 non-breaking space
    333,  // 161 inverted !
    556,  // 162 cent
    556,  // 163 pound
    556,  // 164 currency
    556,  // 165 yen
    260,  // 166 broken bar
    556,  // 167 section
    333,  // 168 dieresis
    737,  // 169 copyright
    370,  // 170 feminine ordinal
    556,  // 171 left guillemet
    584,  // 172 not
    333,  // 173 soft hyphen
    737,  // 174 registered
    333,  // 175 macron
    400,  // 176 degree
    584,  // 177 plus minus
    333,  // 178 superscript 2
    333,  // 179 superscript 3
    333,  // 180 acute
    556,  // 181 mu
    537,  // 182 pilcrow
    278,  // 183 middle dot
    333,  // 184 cedilla
    333,  // 185 superscript 1
    365,  // 186 masculine ordinal
    556,  // 187 right guillemet
    834,  // 188 1/4
    834,  // 189 1/2
    834,  // 190 3/4
    611,  // 191 inverted ?
    667,  // 192 A grave
    667,  // 193 A acute
    667,  // 194 A circumflex
    667,  // 195 A tilde
    667,  // 196 A dieresis
    667,  // 197 A ring
    1000, // 198 AE
    722,  // 199 C cedilla
    667,  // 200 E grave
    667,  // 201 E acute
    667,  // 202 E circumflex
    667,  // 203 E dieresis
    278,  // 204 I grave
    278,  // 205 I acute
    278,  // 206 I circumflex
    278,  // 207 I dieresis
    722,  // 208 Eth
    722,  // 209 N tilde
    778,  // 210 O grave
    778,  // 211 O acute
    778,  // 212 O circumflex
    778,  // 213 O tilde
    778,  // 214 O dieresis
    584,  // 215 multiply
    778,  // 216 O stroke
    722,  // 217 U grave
    722,  // 218 U acute
    722,  // 219 U circumflex
    722,  // 220 U dieresis
    667,  // 221 Y acute
    667,  // 222 Thorn
    611,  // 223 sharp s
    556,  // 224 a grave
    556,  // 225 a acute
    556,  // 226 a circumflex
    556,  // 227 a tilde
    556,  // 228 a dieresis
    556,  // 229 a ring
    889,  // 230 ae
    500,  // 231 c cedilla
    556,  // 232 e grave
    556,  // 233 e acute
    556,  // 234 e circumflex
    556,  // 235 e dieresis
    278,  // 236 i grave
    278,  // 237 i acute
    278,  // 238 i circumflex
    278,  // 239 i dieresis
    556,  // 240 eth
    556,  // 241 n tilde
    556,  // 242 o grave
    556,  // 243 o acute
    556,  // 244 o circumflex
    556,  // 245 o tilde
    556,  // 246 o dieresis
    584,  // 247 divide
    611,  // 248 o stroke
    556,  // 249 u grave
    556,  // 250 u acute
    556,  // 251 u circumflex
    556,  // 252 u dieresis
    500,  // 253 y acute
    556,  // 254 thorn
    500,  // 255 y dieresis
];

/// Measure the advance width of WinAnsi-encoded text in points.
pub fn measure_winansi(encoded: &[u8], font_size: f32) -> f32 {
    let total: u32 = encoded
        .iter()
        .filter(|&&code| code >= 32)
        .map(|&code| HELVETICA_WIDTHS[(code - 32) as usize] as u32)
        .sum();
    total as f32 * font_size / 1000.0
}
